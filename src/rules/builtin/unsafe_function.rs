use once_cell::sync::Lazy;
use regex::Regex;

use super::{char_column, is_comment_line, LineCheck};
use crate::rules::{Rule, Violation};

static UNSAFE_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(gets|strcpy|strcat|sprintf|vsprintf)\s*\(").unwrap());

/// Flags string functions that write without a destination bound.
pub struct UnsafeFunctionCheck;

impl LineCheck for UnsafeFunctionCheck {
    fn check_line(&self, rule: &Rule, line_number: usize, line: &str) -> Vec<Violation> {
        if is_comment_line(line) {
            return Vec::new();
        }

        UNSAFE_CALL_RE
            .captures_iter(line)
            .filter_map(|cap| cap.get(1))
            .map(|func| {
                let name = func.as_str();
                rule.violation(
                    line_number,
                    format!("'{name}' does not bound the destination buffer"),
                )
                .at_column(char_column(line, func.start()))
                .with_suggestion(format!("Use {} instead", bounded_alternative(name)))
            })
            .collect()
    }
}

fn bounded_alternative(func: &str) -> &'static str {
    match func {
        "gets" => "fgets",
        "strcpy" => "strncpy or strlcpy",
        "strcat" => "strncat or strlcat",
        "vsprintf" => "vsnprintf",
        _ => "snprintf",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DetectionStrategy, Severity};

    fn rule() -> Rule {
        Rule::new("c-unsafe-string", "Unsafe", Severity::Error, DetectionStrategy::UnsafeFunction)
    }

    #[test]
    fn flags_each_unbounded_call() {
        let v = UnsafeFunctionCheck.check_line(&rule(), 3, "strcpy(dst, src); strcat(dst, tail);");
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].column, Some(1));
        assert_eq!(v[0].suggestion.as_deref(), Some("Use strncpy or strlcpy instead"));
        assert_eq!(v[1].suggestion.as_deref(), Some("Use strncat or strlcat instead"));
    }

    #[test]
    fn gets_suggests_fgets() {
        let v = UnsafeFunctionCheck.check_line(&rule(), 1, "  gets(line);");
        assert_eq!(v[0].suggestion.as_deref(), Some("Use fgets instead"));
    }

    #[test]
    fn bounded_variants_pass() {
        assert!(UnsafeFunctionCheck
            .check_line(&rule(), 1, "snprintf(buf, sizeof buf, \"%d\", n); fgets(l, n, f);")
            .is_empty());
    }
}
