//! Rule line compiler with exact .gitignore glob semantics
//!
//! A rule line is first split into [`Token`]s, then the tokens are folded into
//! a regular expression. Escaped characters only ever become literal tokens,
//! so user text can never be confused with an internal marker.
//!
//! Folding order matters and follows Git:
//!
//! 1. a leading `/**/` loses its slash so it can match zero directories,
//! 2. `/**/` becomes "one slash or any directories between two slashes",
//! 3. `**/` becomes "nothing or anything ending in a slash",
//! 4. `/**` becomes "nothing or everything below",
//! 5. every remaining `*` matches within a single path segment.

use crate::core::error::PatternError;
use regex::Regex;

/// One lexical unit of a rule line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Path separator
    Slash,
    /// Single `*`, never crosses a separator
    Star,
    /// `**`
    DoubleStar,
    /// Bracket expression, already rendered as a regex class
    Class(String),
    /// Character matched as itself (including escaped ones and `?`)
    Literal(char),
}

/// Intermediate form used while folding double-star segments
#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Raw(Token),
    Group(&'static str),
}

const ANY_DIRS_BETWEEN: &str = "(?:/|/.+/)";
const ANY_LEADING_DIRS: &str = "(?:|.*/)";
const ANYTHING_BELOW: &str = "(?:|/.*)";
const SEGMENT_CHARS: &str = "(?:[^/]*)";

/// Result of compiling one rule line
#[derive(Debug, Clone)]
pub struct CompiledLine {
    pub matcher: Regex,
    pub negate: bool,
}

/// A compiled pattern from one line of a rule file
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    /// The compiled matcher
    pub matcher: Regex,
    /// Whether the line started with `!`
    pub negate: bool,
    /// 1-based line number in the rule file
    pub line_no: usize,
    /// The original line text
    pub line: String,
}

impl IgnorePattern {
    /// Compile `line`, returning `Ok(None)` for blank and comment lines
    pub fn compile(line: &str, line_no: usize) -> Result<Option<Self>, PatternError> {
        Ok(compile_line(line)?.map(|compiled| Self {
            matcher: compiled.matcher,
            negate: compiled.negate,
            line_no,
            line: line.trim_end_matches('\r').to_string(),
        }))
    }

    /// Test a slash-separated path against this pattern
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Compile one rule line into a matcher and a negation flag.
///
/// Blank lines, comments and a bare `!` produce `Ok(None)`. A leading `\#` or
/// `\!` keeps the character literally, since every backslash escape turns the
/// next character into a literal token.
pub fn compile_line(line: &str) -> Result<Option<CompiledLine>, PatternError> {
    let line = line.trim_end_matches('\r');
    let line = line.trim_matches(' ');

    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (negate, body) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    if body.is_empty() {
        return Ok(None);
    }

    let mut tokens = tokenize(body)?;
    if needs_anchor(&tokens) {
        tokens.insert(0, Token::Slash);
    }

    let expr = to_regex(tokens);
    let matcher = Regex::new(&expr)?;

    Ok(Some(CompiledLine { matcher, negate }))
}

/// Split a rule body (without the `!` prefix) into tokens
pub fn tokenize(body: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = body.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let escaped = chars.get(i + 1).ok_or(PatternError::DanglingEscape)?;
                tokens.push(if *escaped == '/' {
                    Token::Slash
                } else {
                    Token::Literal(*escaped)
                });
                i += 2;
            },
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::DoubleStar);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            },
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            },
            '[' => {
                let (class, next) = parse_class(&chars, i)?;
                tokens.push(Token::Class(class));
                i = next;
            },
            c => {
                tokens.push(Token::Literal(c));
                i += 1;
            },
        }
    }

    Ok(tokens)
}

/// Parse a bracket expression starting at `start` (the `[`), returning the
/// regex class and the index just past the closing `]`
fn parse_class(chars: &[char], start: usize) -> Result<(String, usize), PatternError> {
    let mut i = start + 1;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    let mut members: Vec<char> = Vec::new();
    let mut first = true;
    loop {
        let c = *chars
            .get(i)
            .ok_or(PatternError::UnterminatedClass { column: start + 1 })?;
        match c {
            ']' if !first => break,
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or(PatternError::UnterminatedClass { column: start + 1 })?;
                members.push(*escaped);
                i += 2;
            },
            _ => {
                members.push(c);
                i += 1;
            },
        }
        first = false;
    }

    let mut class = String::from("[");
    if negated {
        class.push('^');
        class.push('/');
    }
    for (idx, member) in members.iter().enumerate() {
        let is_range = *member == '-' && idx > 0 && idx + 1 < members.len();
        if is_range {
            class.push('-');
        } else {
            class.push_str(&regex::escape(&member.to_string()));
        }
    }
    class.push(']');

    Ok((class, i + 1))
}

/// A slash inside the pattern followed later by a `*.ext` style wildcard
/// pins the pattern to its own directory
fn needs_anchor(tokens: &[Token]) -> bool {
    if tokens.first() == Some(&Token::Slash) {
        return false;
    }

    let inner_slash = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, t)| **t == Token::Slash && tokens[i - 1] != Token::Slash)
        .map(|(i, _)| i);

    match inner_slash {
        Some(slash) => tokens[slash + 1..].windows(2).any(|w| {
            matches!(w[0], Token::Star | Token::DoubleStar) && w[1] == Token::Literal('.')
        }),
        None => false,
    }
}

/// Fold tokens matching `pattern` (leftmost, non-overlapping) into `group`
fn fold(pieces: Vec<Piece>, pattern: &[Token], group: &'static str) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len());
    let mut i = 0;
    while i < pieces.len() {
        let hit = i + pattern.len() <= pieces.len()
            && pattern
                .iter()
                .zip(&pieces[i..])
                .all(|(want, got)| matches!(got, Piece::Raw(t) if t == want));
        if hit {
            out.push(Piece::Group(group));
            i += pattern.len();
        } else {
            out.push(pieces[i].clone());
            i += 1;
        }
    }
    out
}

fn to_regex(mut tokens: Vec<Token>) -> String {
    if tokens.starts_with(&[Token::Slash, Token::DoubleStar, Token::Slash]) {
        tokens.remove(0);
    }

    let mut pieces: Vec<Piece> = tokens.into_iter().map(Piece::Raw).collect();
    pieces = fold(
        pieces,
        &[Token::Slash, Token::DoubleStar, Token::Slash],
        ANY_DIRS_BETWEEN,
    );
    pieces = fold(pieces, &[Token::DoubleStar, Token::Slash], ANY_LEADING_DIRS);
    pieces = fold(pieces, &[Token::Slash, Token::DoubleStar], ANYTHING_BELOW);

    let dir_only = pieces.last() == Some(&Piece::Raw(Token::Slash));
    let anchored = pieces.first() == Some(&Piece::Raw(Token::Slash));
    let body = if anchored { &pieces[1..] } else { &pieces[..] };

    let mut expr = String::from("^");
    expr.push_str(if anchored { "(?:|/)" } else { ANY_LEADING_DIRS });

    for piece in body {
        match piece {
            Piece::Group(group) => expr.push_str(group),
            Piece::Raw(Token::Slash) => expr.push('/'),
            Piece::Raw(Token::Star) => expr.push_str(SEGMENT_CHARS),
            Piece::Raw(Token::DoubleStar) => {
                expr.push_str(SEGMENT_CHARS);
                expr.push_str(SEGMENT_CHARS);
            },
            Piece::Raw(Token::Class(class)) => expr.push_str(class),
            Piece::Raw(Token::Literal(c)) => expr.push_str(&regex::escape(&c.to_string())),
        }
    }

    expr.push_str(if dir_only { "(?:|.*)$" } else { "(?:|/.*)$" });
    expr
}
