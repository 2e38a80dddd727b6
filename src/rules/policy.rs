use serde::{Deserialize, Serialize};

use super::Severity;
use crate::engine::EvaluationResult;

/// Policy verdict — the pass/fail decision over a batch of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_violations: usize,
    pub highest_severity: Option<Severity>,
    pub fail_threshold: Severity,
}

/// Policy configuration loaded from `.cstandards.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Minimum severity to fail the run.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
}

fn default_fail_on() -> Severity {
    Severity::Error
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: default_fail_on(),
        }
    }
}

impl Policy {
    /// Evaluate results against this policy and produce a verdict.
    pub fn evaluate(&self, results: &[EvaluationResult]) -> PolicyVerdict {
        let severities = results
            .iter()
            .flat_map(|r| r.violations.iter().map(|v| v.severity));

        let highest = severities.clone().max();
        let failed = severities.clone().any(|sev| sev >= self.fail_on);

        PolicyVerdict {
            pass: !failed,
            total_violations: severities.count(),
            highest_severity: highest,
            fail_threshold: self.fail_on,
        }
    }
}
