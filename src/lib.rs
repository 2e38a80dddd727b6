//! cstandards — coding-standards evaluation for C sources.
//!
//! Selects rules from a catalog by category, severity and project
//! configuration, runs line-oriented checks over each file, and renders a
//! summarized report (Markdown, console, JSON or SARIF).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use cstandards::{check, CheckOptions};
//!
//! let options = CheckOptions::default();
//! let report = check(&[PathBuf::from("./src")], &options).unwrap();
//! println!("Pass: {}, Files: {}", report.verdict.pass, report.results.len());
//! ```

pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod ir;
pub mod output;
pub mod rules;

use std::path::{Path, PathBuf};

use config::Config;
use discovery::FileFilter;
use error::Result;
use output::OutputFormat;
use rules::policy::PolicyVerdict;
use rules::Severity;

pub use engine::{EvaluationOptions, EvaluationResult, Evaluator, Summary};
pub use ir::CodeContext;
pub use output::generate_report;

/// Options for a check invocation.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Path to config file (defaults to `.cstandards.toml` in the working directory).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for the fail_on threshold.
    pub fail_on_override: Option<Severity>,
    /// Rule selection and cap options passed to every evaluation.
    pub evaluation: EvaluationOptions,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Markdown,
            fail_on_override: None,
            evaluation: EvaluationOptions::default(),
        }
    }
}

/// Complete check report.
#[derive(Debug)]
pub struct CheckReport {
    pub results: Vec<EvaluationResult>,
    pub verdict: PolicyVerdict,
}

/// Run a complete check: load config, collect sources, evaluate, apply policy.
///
/// Either every file is evaluated or an error is returned; there is no
/// partial report.
pub fn check(paths: &[PathBuf], options: &CheckOptions) -> Result<CheckReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(".cstandards.toml"));
    let mut config = Config::load(&config_path)?;

    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }

    let catalog = config.build_catalog()?;
    let filter = FileFilter::new(&config.files)?;

    let mut contexts = Vec::new();
    for path in paths {
        contexts.extend(discovery::collect_contexts(path, &filter)?);
    }

    let evaluator = Evaluator::new(&catalog, &config);
    let results = evaluator.evaluate_batch(&contexts, &options.evaluation)?;
    let verdict = config.policy.evaluate(&results);

    Ok(CheckReport { results, verdict })
}

/// Render a check report in the specified format.
pub fn render_report(report: &CheckReport, format: OutputFormat) -> Result<String> {
    output::render(&report.results, &report.verdict, format)
}

/// Convenience for a single in-memory artifact with the built-in catalog
/// and an empty project configuration.
pub fn evaluate_source(file_path: &Path, content: &str) -> Result<EvaluationResult> {
    let catalog = rules::Catalog::builtin();
    let configuration = config::ProjectConfiguration::default();
    Evaluator::new(&catalog, &configuration).evaluate(
        &CodeContext::new(file_path.display().to_string(), content),
        &EvaluationOptions::default(),
    )
}
