use crate::engine::{EvaluationResult, Summary};
use crate::rules::policy::PolicyVerdict;

/// Render results as compiler-style console lines, in evaluation order.
pub fn render(results: &[EvaluationResult], verdict: &PolicyVerdict) -> String {
    let mut output = String::new();

    let totals = results
        .iter()
        .fold(Summary::default(), |acc, r| acc.merge(r.summary));

    if totals.total == 0 {
        output.push_str(&format!(
            "\n  No violations in {} file(s).\n\n",
            results.len()
        ));
        return output;
    }

    output.push('\n');
    for result in results {
        for v in &result.violations {
            let location = match (v.line, v.column) {
                (Some(line), Some(col)) => format!("{}:{}:{}", result.file_path, line, col),
                (Some(line), None) => format!("{}:{}", result.file_path, line),
                _ => result.file_path.clone(),
            };
            output.push_str(&format!(
                "  {}: {:<7} [{}] {}\n",
                location,
                v.severity.to_string(),
                v.rule_id,
                v.message
            ));
            if let Some(suggestion) = &v.suggestion {
                output.push_str(&format!("      help: {}\n", suggestion));
            }
        }
    }

    output.push_str(&format!(
        "\n  {} violation(s) in {} file(s): {} error(s), {} warning(s), {} info\n",
        totals.total,
        results.len(),
        totals.errors,
        totals.warnings,
        totals.info
    ));

    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  Result: {} (threshold: {}, highest: {})\n\n",
        status,
        verdict.fail_threshold,
        verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::policy::Policy;
    use crate::rules::{Severity, Violation};

    #[test]
    fn clean_batch_message() {
        let verdict = Policy::default().evaluate(&[]);
        assert!(render(&[], &verdict).contains("No violations in 0 file(s)"));
    }

    #[test]
    fn lists_location_and_verdict() {
        let violations = vec![Violation {
            rule_id: "c-memory-allocation".into(),
            rule_name: "Unchecked Allocation".into(),
            severity: Severity::Error,
            message: "Result of 'malloc' is not checked for NULL".into(),
            line: Some(4),
            column: Some(9),
            suggestion: None,
        }];
        let results = vec![EvaluationResult {
            file_path: "src/buf.c".into(),
            summary: Summary::from_violations(&violations),
            violations,
        }];
        let verdict = Policy::default().evaluate(&results);

        let out = render(&results, &verdict);
        assert!(out.contains("src/buf.c:4:9: ERROR   [c-memory-allocation]"));
        assert!(out.contains("Result: FAIL (threshold: ERROR, highest: ERROR)"));
    }
}
