use once_cell::sync::Lazy;
use regex::Regex;

use super::{char_column, is_comment_line, LineCheck};
use crate::rules::{Rule, Violation};

static ALLOC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(malloc|calloc|realloc|strdup)\s*\(").unwrap());

/// Tokens that count as a same-line result check.
static CHECK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(if|while|assert|NULL)\b|\?").unwrap());

/// Flags allocation calls whose result is not checked on the same line.
///
/// The usual two-line idiom (`p = malloc(n);` then `if (!p)`) is reported,
/// since checks never look past the current line.
pub struct MemoryCheck;

impl LineCheck for MemoryCheck {
    fn check_line(&self, rule: &Rule, line_number: usize, line: &str) -> Vec<Violation> {
        if is_comment_line(line) || CHECK_RE.is_match(line) {
            return Vec::new();
        }

        ALLOC_RE
            .captures_iter(line)
            .filter_map(|cap| cap.get(1))
            .map(|func| {
                let name = func.as_str();
                rule.violation(
                    line_number,
                    format!("Result of '{name}' is not checked for NULL"),
                )
                .at_column(char_column(line, func.start()))
                .with_suggestion(format!(
                    "Check the result of {name}() against NULL before using it"
                ))
            })
            .collect()
    }
}
