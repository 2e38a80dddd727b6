use super::LineCheck;
use crate::rules::{Rule, Violation};

const DEFAULT_MAX_COLUMNS: usize = 100;

/// Flags lines longer than `max_columns` characters.
pub struct LineLengthCheck {
    pub max_columns: usize,
}

impl Default for LineLengthCheck {
    fn default() -> Self {
        Self {
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl LineCheck for LineLengthCheck {
    fn check_line(&self, rule: &Rule, line_number: usize, line: &str) -> Vec<Violation> {
        let width = line.trim_end_matches('\r').chars().count();
        if width <= self.max_columns {
            return Vec::new();
        }

        vec![rule
            .violation(
                line_number,
                format!("Line is {width} characters long (limit {})", self.max_columns),
            )
            .at_column(self.max_columns + 1)
            .with_suggestion("Break the expression or extract a helper".into())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DetectionStrategy, Severity};

    fn rule() -> Rule {
        Rule::new("c-style-line-length", "Length", Severity::Info, DetectionStrategy::LineLength)
    }

    #[test]
    fn limit_is_inclusive() {
        let check = LineLengthCheck::default();
        assert!(check.check_line(&rule(), 1, &"x".repeat(100)).is_empty());

        let v = check.check_line(&rule(), 2, &"x".repeat(101));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].column, Some(101));
        assert_eq!(v[0].message, "Line is 101 characters long (limit 100)");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let check = LineLengthCheck { max_columns: 4 };
        assert!(check.check_line(&rule(), 1, "/*é*/").len() == 1);
        assert!(check.check_line(&rule(), 1, "éééé").is_empty());
    }

    #[test]
    fn ignores_carriage_return() {
        let check = LineLengthCheck { max_columns: 3 };
        assert!(check.check_line(&rule(), 1, "abc\r").is_empty());
    }
}
