//! Ordered patterns from a single rule file

use crate::core::error::{IgnoreError, PatternError, Result};
use crate::core::path::normalize_separators;
use crate::ignore::parser::IgnorePattern;
use std::fs;
use std::path::Path;

/// Outcome of evaluating a path against one [`RuleSet`]
#[derive(Debug, Clone, Copy)]
pub struct Decision<'a> {
    pub matched: bool,
    /// Last non-negated pattern that matched, set only when `matched`
    pub pattern: Option<&'a IgnorePattern>,
}

/// A line that was skipped because it could not be compiled
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    pub line_no: usize,
    pub line: String,
    pub error: PatternError,
}

/// Compiled patterns of one rule file, kept in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    patterns: Vec<IgnorePattern>,
    rejected: Vec<RejectedLine>,
}

impl RuleSet {
    /// Compile in-memory rule lines. Line numbers start at 1.
    pub fn compile_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match IgnorePattern::compile(line, idx + 1) {
                Ok(Some(pattern)) => set.patterns.push(pattern),
                Ok(None) => {},
                Err(error) => {
                    tracing::warn!(line_no = idx + 1, line, %error, "skipping invalid ignore rule");
                    set.rejected.push(RejectedLine {
                        line_no: idx + 1,
                        line: line.to_string(),
                        error,
                    });
                },
            }
        }

        set
    }

    /// Read and compile a rule file
    pub fn compile_file(path: &Path) -> Result<Self> {
        Self::compile_file_and_lines(path, std::iter::empty::<&str>())
    }

    /// Read and compile a rule file, then append `extra` lines after it
    pub fn compile_file_and_lines<I, S>(path: &Path, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let bytes = fs::read(path).map_err(|e| IgnoreError::rule_file_unreadable(path, e))?;
        let content = String::from_utf8_lossy(&bytes);

        let lines = content
            .split('\n')
            .map(str::to_string)
            .chain(extra.into_iter().map(|s| s.as_ref().to_string()));

        Ok(Self::compile_lines(lines))
    }

    /// Evaluate `path` (relative to the rule file's directory).
    ///
    /// Later patterns win. A negated pattern only clears a match made by an
    /// earlier pattern, it never creates one.
    pub fn matches_path_how(&self, path: &str) -> Decision<'_> {
        let path = normalize_separators(path);

        let mut decision = Decision {
            matched: false,
            pattern: None,
        };

        for pattern in &self.patterns {
            if !pattern.is_match(&path) {
                continue;
            }
            if !pattern.negate {
                decision.matched = true;
                decision.pattern = Some(pattern);
            } else if decision.matched {
                decision.matched = false;
                decision.pattern = None;
            }
        }

        decision
    }

    /// Whether `path` is excluded by this rule set
    pub fn matches_path(&self, path: &str) -> bool {
        self.matches_path_how(path).matched
    }

    pub fn patterns(&self) -> &[IgnorePattern] {
        &self.patterns
    }

    /// Lines dropped during compilation
    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_negation_reincludes_only_named_file() {
        let rules = RuleSet::compile_lines(["*.txt", "!important.txt"]);

        assert!(rules.matches_path("a.txt"));
        assert!(rules.matches_path("notes.txt"));
        assert!(!rules.matches_path("important.txt"));
        assert!(!rules.matches_path("root_file.go"));
    }

    #[test]
    fn test_negation_without_prior_match_has_no_effect() {
        let rules = RuleSet::compile_lines(["!keep.log", "*.log"]);

        // The negation came first, so the later exclusion wins
        assert!(rules.matches_path("keep.log"));
    }

    #[test]
    fn test_later_pattern_reexcludes() {
        let rules = RuleSet::compile_lines(["*.log", "!debug.log", "debug.log"]);
        let decision = rules.matches_path_how("debug.log");

        assert!(decision.matched);
        assert_eq!(decision.pattern.map(|p| p.line_no), Some(3));
    }

    #[test]
    fn test_responsible_pattern_reports_line() {
        let rules = RuleSet::compile_lines(["# header", "", "*.tmp", "build/"]);
        assert_eq!(rules.len(), 2);

        let decision = rules.matches_path_how("build/out.o");
        let pattern = decision.pattern.expect("build/ should match");
        assert_eq!(pattern.line_no, 4);
        assert_eq!(pattern.line, "build/");

        let negated = RuleSet::compile_lines(["*.tmp", "!a.tmp"]);
        assert!(negated.matches_path_how("a.tmp").pattern.is_none());
    }

    #[test]
    fn test_malformed_line_does_not_poison_file() {
        let rules = RuleSet::compile_lines(["*.tmp", "[broken", "*.log"]);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rejected().len(), 1);
        assert_eq!(rules.rejected()[0].line_no, 2);
        assert!(rules.matches_path("x.log"));
        assert!(rules.matches_path("x.tmp"));
    }

    #[test]
    fn test_compile_file_and_lines() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(".gitignore");
        fs::write(&path, "*.tmp\r\n!keep.tmp\n")?;

        let rules = RuleSet::compile_file(&path)?;
        assert!(rules.matches_path("a.tmp"));
        assert!(!rules.matches_path("keep.tmp"));

        let extended = RuleSet::compile_file_and_lines(&path, ["keep.tmp"])?;
        assert!(extended.matches_path("keep.tmp"));
        assert_eq!(extended.patterns().last().map(|p| p.line_no), Some(4));

        Ok(())
    }

    #[test]
    fn test_compile_missing_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let err = RuleSet::compile_file(&temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, IgnoreError::RuleFileUnreadable { .. }));
    }

    fn rule_line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("*.txt".to_string()),
            Just("!*.txt".to_string()),
            Just("a*".to_string()),
            Just("!a.txt".to_string()),
            Just("dir/".to_string()),
            Just("!dir/".to_string()),
            Just("**/b.txt".to_string()),
            Just("!b.txt".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn prop_appending_rules_never_rewrites_earlier_decisions(
            rules in proptest::collection::vec(rule_line(), 0..8),
            extra in proptest::collection::vec(rule_line(), 0..4),
            path in prop_oneof![
                Just("a.txt"), Just("b.txt"), Just("dir/a.txt"), Just("dir/b.txt"), Just("c.go")
            ],
        ) {
            let prefix = RuleSet::compile_lines(&rules);
            let mut combined = rules.clone();
            combined.extend(extra.iter().cloned());
            let full = RuleSet::compile_lines(&combined);

            // Replaying the extra lines from the prefix state reproduces the full result
            let mut matched = prefix.matches_path(path);
            for line in &extra {
                let single = RuleSet::compile_lines([line]);
                if single.matches_path(path) {
                    matched = true;
                } else if line.starts_with('!')
                    && RuleSet::compile_lines([&line[1..]]).matches_path(path)
                {
                    matched = false;
                }
            }
            prop_assert_eq!(matched, full.matches_path(path));
        }
    }
}
