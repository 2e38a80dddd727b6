mod line_length;
mod memory;
mod naming;
mod unsafe_function;

use std::collections::HashMap;

use super::{DetectionStrategy, Rule, Violation};
use crate::ir::CodeContext;

pub use naming::to_snake_case;

/// A line check scans one line of source at a time and reports violations
/// of `rule`. Checks keep no state between lines.
pub trait LineCheck: Send + Sync {
    fn check_line(&self, rule: &Rule, line_number: usize, line: &str) -> Vec<Violation>;
}

/// Line checks registered by detection strategy.
pub struct DetectorRegistry {
    checks: HashMap<DetectionStrategy, Box<dyn LineCheck>>,
}

impl DetectorRegistry {
    /// A registry with no checks; every rule yields zero violations.
    pub fn empty() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    /// Registry with all built-in checks.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(DetectionStrategy::Naming, Box::new(naming::NamingCheck));
        registry.register(DetectionStrategy::Memory, Box::new(memory::MemoryCheck));
        registry.register(
            DetectionStrategy::UnsafeFunction,
            Box::new(unsafe_function::UnsafeFunctionCheck),
        );
        registry.register(
            DetectionStrategy::LineLength,
            Box::new(line_length::LineLengthCheck::default()),
        );
        registry
    }

    /// Register (or replace) the check for a strategy.
    pub fn register(&mut self, strategy: DetectionStrategy, check: Box<dyn LineCheck>) {
        self.checks.insert(strategy, check);
    }

    /// Apply one rule to one artifact. Line numbers are 1-based; a rule
    /// whose strategy has no registered check produces nothing.
    pub fn apply_rule(&self, rule: &Rule, context: &CodeContext) -> Vec<Violation> {
        let Some(check) = self.checks.get(&rule.strategy) else {
            return Vec::new();
        };

        context
            .content
            .lines()
            .enumerate()
            .flat_map(|(idx, line)| check.check_line(rule, idx + 1, line))
            .collect()
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Whole-line comments are not scanned by the token checks.
///
/// A leading `*` only marks a block-comment continuation when followed by
/// whitespace, `/` or the end of the line; `*out = ...` is code.
fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") || trimmed.starts_with("/*") {
        return true;
    }
    match trimmed.strip_prefix('*') {
        Some(rest) => rest
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '/'),
        None => false,
    }
}

/// 1-based character column of a byte offset within `line`.
fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Severity;

    fn naming_rule() -> Rule {
        Rule::new("naming-convention", "Naming", Severity::Warning, DetectionStrategy::Naming)
    }

    #[test]
    fn manual_rule_yields_nothing() {
        let rule = Rule::new("c-doc-comments", "Docs", Severity::Info, DetectionStrategy::Manual);
        let ctx = CodeContext::new("a.c", "  getUserName();\n  p = malloc(4);\n");
        assert!(DetectorRegistry::builtin().apply_rule(&rule, &ctx).is_empty());
    }

    #[test]
    fn dispatch_is_by_strategy_not_id() {
        // The id mentions "memory" but the strategy is Naming.
        let rule = Rule::new("memory-naming", "Odd", Severity::Info, DetectionStrategy::Naming);
        let ctx = CodeContext::new("a.c", "  p = malloc(4);\n");
        assert!(DetectorRegistry::builtin().apply_rule(&rule, &ctx).is_empty());
    }

    #[test]
    fn empty_registry_yields_nothing() {
        let ctx = CodeContext::new("a.c", "  getUserName();\n");
        assert!(DetectorRegistry::empty()
            .apply_rule(&naming_rule(), &ctx)
            .is_empty());
    }

    #[test]
    fn line_numbers_are_one_based() {
        let ctx = CodeContext::new("a.c", "int x;\n\n  getUserName();\n");
        let violations = DetectorRegistry::builtin().apply_rule(&naming_rule(), &ctx);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, Some(3));
    }

    #[test]
    fn one_violation_per_matching_line() {
        let ctx = CodeContext::new("a.c", "  getUserName();\n  setUserName(n);\n");
        let violations = DetectorRegistry::builtin().apply_rule(&naming_rule(), &ctx);
        let lines: Vec<_> = violations.iter().map(|v| v.line).collect();
        assert_eq!(lines, vec![Some(1), Some(2)]);
    }

    #[test]
    fn custom_check_can_be_registered() {
        struct TodoCheck;
        impl LineCheck for TodoCheck {
            fn check_line(&self, rule: &Rule, line_number: usize, line: &str) -> Vec<Violation> {
                if line.contains("TODO") {
                    vec![rule.violation(line_number, "TODO left in source".into())]
                } else {
                    vec![]
                }
            }
        }

        let mut registry = DetectorRegistry::empty();
        registry.register(DetectionStrategy::Manual, Box::new(TodoCheck));
        let rule = Rule::new("c-doc-todo", "Todo", Severity::Info, DetectionStrategy::Manual);
        let ctx = CodeContext::new("a.c", "/* TODO */\nint x;\n");
        assert_eq!(registry.apply_rule(&rule, &ctx).len(), 1);
    }

    #[test]
    fn comment_lines_detected() {
        assert!(is_comment_line("  // getUserName();"));
        assert!(is_comment_line("/* getUserName() */"));
        assert!(is_comment_line(" * Allocates the frame with malloc(len)."));
        assert!(is_comment_line(" */"));
        assert!(is_comment_line(" *"));
        assert!(!is_comment_line("x = 1; // trailing"));
    }

    #[test]
    fn dereference_lines_are_code() {
        assert!(!is_comment_line("    *out = malloc(len);"));
        assert!(!is_comment_line("*p++ = 0;"));
    }

    #[test]
    fn dereference_line_is_scanned() {
        let rule = Rule::new("c-memory-allocation", "Alloc", Severity::Error, DetectionStrategy::Memory);
        let ctx = CodeContext::new("p.c", "    *out = malloc(len);\n");
        let violations = DetectorRegistry::builtin().apply_rule(&rule, &ctx);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].column, Some(12));
    }

    #[test]
    fn char_column_counts_characters() {
        let line = "x = \"é\"; getUserName();";
        let offset = line.find("getUserName").unwrap();
        assert_eq!(offset, 10);
        assert_eq!(char_column(line, offset), 10);
        assert_eq!(char_column("abc", 0), 1);
    }
}
