pub mod console;
pub mod json;
pub mod markdown;
pub mod sarif;

use serde::{Deserialize, Serialize};

use crate::engine::EvaluationResult;
use crate::error::Result;
use crate::rules::policy::PolicyVerdict;

pub use markdown::generate_report;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Console,
    Json,
    Sarif,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Some(Self::Markdown),
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "sarif" => Some(Self::Sarif),
            _ => None,
        }
    }
}

/// Render evaluation results into the specified format.
pub fn render(
    results: &[EvaluationResult],
    verdict: &PolicyVerdict,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown::generate_report(results)),
        OutputFormat::Console => Ok(console::render(results, verdict)),
        OutputFormat::Json => json::render(results, verdict),
        OutputFormat::Sarif => sarif::render(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_aliases() {
        assert_eq!(OutputFormat::from_str_lenient("MD"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_str_lenient("text"), Some(OutputFormat::Console));
        assert_eq!(OutputFormat::from_str_lenient("html"), None);
    }
}
