use crate::engine::{EvaluationResult, Summary};
use crate::error::Result;
use crate::rules::policy::PolicyVerdict;

use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [EvaluationResult],
    summary: Summary,
    verdict: &'a PolicyVerdict,
}

/// Render results as a JSON report.
pub fn render(results: &[EvaluationResult], verdict: &PolicyVerdict) -> Result<String> {
    let summary = results
        .iter()
        .fold(Summary::default(), |acc, r| acc.merge(r.summary));
    let report = JsonReport {
        results,
        summary,
        verdict,
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
