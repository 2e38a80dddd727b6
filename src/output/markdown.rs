use std::fmt::Write;

use crate::engine::{EvaluationResult, Summary};

/// Render results as the Markdown evaluation report.
///
/// Totals are folded from each result's summary. Files without violations
/// count toward the summary but get no detail section. Output depends only
/// on the input.
pub fn generate_report(results: &[EvaluationResult]) -> String {
    let totals = results
        .iter()
        .fold(Summary::default(), |acc, r| acc.merge(r.summary));

    let mut out = String::new();
    out.push_str("# C Coding Standards Evaluation Report\n\n");
    out.push_str("## Summary\n");
    // Writing into a String cannot fail.
    let _ = writeln!(out, "- Files evaluated: {}", results.len());
    let _ = writeln!(out, "- Total violations: {}", totals.total);
    let _ = writeln!(out, "- Errors: {}", totals.errors);
    let _ = writeln!(out, "- Warnings: {}", totals.warnings);
    let _ = writeln!(out, "- Info: {}", totals.info);
    out.push_str("\n## Details\n");

    for result in results.iter().filter(|r| !r.violations.is_empty()) {
        let s = result.summary;
        let _ = writeln!(out, "\n### {}", result.file_path);
        let _ = writeln!(
            out,
            "Violations: {} ({} errors, {} warnings, {} info)",
            s.total, s.errors, s.warnings, s.info
        );
        for v in &result.violations {
            match v.line {
                Some(line) => {
                    let _ = writeln!(out, "- **[{}]** Line {}: {}", v.severity, line, v.message);
                }
                None => {
                    let _ = writeln!(out, "- **[{}]** {}", v.severity, v.message);
                }
            }
            if let Some(suggestion) = &v.suggestion {
                let _ = writeln!(out, "  - Suggestion: {suggestion}");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Severity, Violation};
    use pretty_assertions::assert_eq;

    fn violation(severity: Severity, line: Option<usize>, suggestion: Option<&str>) -> Violation {
        Violation {
            rule_id: "c-test-rule".into(),
            rule_name: "Test".into(),
            severity,
            message: "something is off".into(),
            line,
            column: None,
            suggestion: suggestion.map(str::to_string),
        }
    }

    fn result(path: &str, violations: Vec<Violation>) -> EvaluationResult {
        EvaluationResult {
            file_path: path.into(),
            summary: Summary::from_violations(&violations),
            violations,
        }
    }

    #[test]
    fn renders_exact_layout() {
        let results = vec![
            result(
                "src/a.c",
                vec![
                    violation(Severity::Error, Some(3), Some("Check for NULL")),
                    violation(Severity::Info, None, None),
                ],
            ),
            result("src/clean.c", vec![]),
            result("src/b.c", vec![violation(Severity::Warning, Some(10), None)]),
        ];

        let expected = "\
# C Coding Standards Evaluation Report

## Summary
- Files evaluated: 3
- Total violations: 3
- Errors: 1
- Warnings: 1
- Info: 1

## Details

### src/a.c
Violations: 2 (1 errors, 0 warnings, 1 info)
- **[ERROR]** Line 3: something is off
  - Suggestion: Check for NULL
- **[INFO]** something is off

### src/b.c
Violations: 1 (0 errors, 1 warnings, 0 info)
- **[WARNING]** Line 10: something is off
";
        assert_eq!(generate_report(&results), expected);
    }

    #[test]
    fn empty_batch_has_zero_summary() {
        let report = generate_report(&[]);
        assert!(report.contains("- Files evaluated: 0\n"));
        assert!(report.contains("- Total violations: 0\n"));
        assert!(report.ends_with("## Details\n"));
    }

    #[test]
    fn totals_fold_from_summaries() {
        let results = vec![
            result(
                "c1.c",
                vec![
                    violation(Severity::Warning, Some(1), None),
                    violation(Severity::Warning, Some(2), None),
                ],
            ),
            result(
                "c2.c",
                vec![
                    violation(Severity::Error, Some(1), None),
                    violation(Severity::Info, Some(5), None),
                ],
            ),
        ];
        let report = generate_report(&results);
        assert!(report.contains("- Total violations: 4\n"));
        let rendered = report.lines().filter(|l| l.starts_with("- **[")).count();
        assert_eq!(rendered, 4);
    }

    #[test]
    fn rendering_is_deterministic() {
        let results = vec![result("a.c", vec![violation(Severity::Error, Some(1), None)])];
        assert_eq!(generate_report(&results), generate_report(&results));
    }
}
