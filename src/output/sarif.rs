use std::collections::HashSet;

use crate::engine::EvaluationResult;
use crate::error::Result;
use crate::rules::Severity;

use serde_json::{json, Value};

/// Render results as SARIF 2.1.0.
///
/// Produces a self-contained SARIF log for GitHub Code Scanning and other
/// SARIF consumers. Rules are listed once each, in first-seen order.
pub fn render(results: &[EvaluationResult]) -> Result<String> {
    let mut seen = HashSet::new();
    let rules: Vec<Value> = results
        .iter()
        .flat_map(|r| &r.violations)
        .filter(|v| seen.insert(v.rule_id.as_str()))
        .map(|v| {
            json!({
                "id": v.rule_id,
                "name": v.rule_name,
                "shortDescription": { "text": v.rule_name },
                "defaultConfiguration": {
                    "level": severity_to_sarif_level(v.severity),
                },
            })
        })
        .collect();

    let sarif_results: Vec<Value> = results
        .iter()
        .flat_map(|r| r.violations.iter().map(move |v| (r, v)))
        .map(|(r, v)| {
            let mut result = json!({
                "ruleId": v.rule_id,
                "level": severity_to_sarif_level(v.severity),
                "message": { "text": v.message },
            });

            let mut region = json!({});
            if let Some(line) = v.line {
                region["startLine"] = json!(line);
            }
            if let Some(column) = v.column {
                region["startColumn"] = json!(column);
            }
            result["locations"] = json!([{
                "physicalLocation": {
                    "artifactLocation": { "uri": r.file_path },
                    "region": region,
                },
            }]);

            if let Some(suggestion) = &v.suggestion {
                result["fixes"] = json!([{
                    "description": { "text": suggestion },
                }]);
            }

            result
        })
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "cstandards",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "results": sarif_results,
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}

fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Summary;
    use crate::rules::Violation;

    fn violation(rule_id: &str, severity: Severity, line: usize) -> Violation {
        Violation {
            rule_id: rule_id.into(),
            rule_name: rule_id.into(),
            severity,
            message: "msg".into(),
            line: Some(line),
            column: Some(2),
            suggestion: Some("fix it".into()),
        }
    }

    #[test]
    fn dedupes_rules_and_maps_levels() {
        let violations = vec![
            violation("c-memory-allocation", Severity::Error, 1),
            violation("c-memory-allocation", Severity::Error, 8),
            violation("c-style-line-length", Severity::Info, 9),
        ];
        let results = vec![EvaluationResult {
            file_path: "src/a.c".into(),
            summary: Summary::from_violations(&violations),
            violations,
        }];

        let value: serde_json::Value = serde_json::from_str(&render(&results).unwrap()).unwrap();
        let run = &value["runs"][0];
        assert_eq!(run["tool"]["driver"]["rules"].as_array().unwrap().len(), 2);
        assert_eq!(run["results"].as_array().unwrap().len(), 3);
        assert_eq!(run["results"][2]["level"], "note");
        assert_eq!(
            run["results"][1]["locations"][0]["physicalLocation"]["region"]["startLine"],
            8
        );
        assert_eq!(
            run["results"][0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "src/a.c"
        );
    }
}
