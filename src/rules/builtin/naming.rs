use once_cell::sync::Lazy;
use regex::Regex;

use super::{char_column, is_comment_line, LineCheck};
use crate::rules::{Rule, Violation};

/// Lowercase-first identifier with at least one interior capital,
/// immediately followed by `(`.
static CAMEL_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([a-z][a-z0-9]*(?:[A-Z][a-z0-9]*)+)\(").unwrap());

/// Flags camelCase function names at call and definition sites.
///
/// Purely lexical: `obj.methodName(` in embedded C++ is flagged too, and a
/// name split across lines (`getUser\nName(`) is missed.
pub struct NamingCheck;

impl LineCheck for NamingCheck {
    fn check_line(&self, rule: &Rule, line_number: usize, line: &str) -> Vec<Violation> {
        if is_comment_line(line) {
            return Vec::new();
        }

        CAMEL_CALL_RE
            .captures_iter(line)
            .filter_map(|cap| cap.get(1))
            .map(|name| {
                let ident = name.as_str();
                let snake = to_snake_case(ident);
                rule.violation(
                    line_number,
                    format!("Function name '{ident}' should use snake_case"),
                )
                .at_column(char_column(line, name.start()))
                .with_suggestion(format!("Rename to '{snake}'"))
            })
            .collect()
    }
}

/// `getUserName` → `get_user_name`. Runs of capitals stay together:
/// `parseHTTPHeader` → `parse_http_header`.
pub fn to_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let starts_word = match prev {
                None => false,
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                Some(_) => false,
            };
            if starts_word {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
