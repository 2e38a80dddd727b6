//! Evaluation: select rules for an artifact, run their checks, summarize.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ConfigurationProvider;
use crate::error::Result;
use crate::ir::CodeContext;
use crate::rules::{select_rules, DetectorRegistry, RuleCatalog, Severity, Violation};

/// Per-call evaluation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Categories to evaluate; overrides the context and project categories.
    pub categories: Option<BTreeSet<String>>,
    /// Only rules with exactly this severity.
    pub severity: Option<Severity>,
    /// Skip rules disabled in the catalog.
    pub enabled_only: bool,
    /// Stop applying further rules once this many violations are collected.
    pub max_violations: Option<usize>,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            categories: None,
            severity: None,
            enabled_only: true,
            max_violations: None,
        }
    }
}

/// Violation counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_violations(violations: &[Violation]) -> Self {
        violations.iter().fold(Self::default(), |mut acc, v| {
            match v.severity {
                Severity::Error => acc.errors += 1,
                Severity::Warning => acc.warnings += 1,
                Severity::Info => acc.info += 1,
            }
            acc.total += 1;
            acc
        })
    }

    /// Field-wise sum, used to fold per-file summaries into a batch total.
    pub fn merge(self, other: Self) -> Self {
        Self {
            errors: self.errors + other.errors,
            warnings: self.warnings + other.warnings,
            info: self.info + other.info,
            total: self.total + other.total,
        }
    }
}

/// Outcome of evaluating one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub file_path: String,
    /// Rule order first, then line order within a rule.
    pub violations: Vec<Violation>,
    pub summary: Summary,
}

/// Runs catalog rules against code artifacts.
///
/// The catalog and configuration are injected; each `evaluate` call takes
/// a fresh snapshot of both and never mutates them.
pub struct Evaluator<'a> {
    catalog: &'a dyn RuleCatalog,
    configuration: &'a dyn ConfigurationProvider,
    registry: DetectorRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(catalog: &'a dyn RuleCatalog, configuration: &'a dyn ConfigurationProvider) -> Self {
        Self {
            catalog,
            configuration,
            registry: DetectorRegistry::builtin(),
        }
    }

    pub fn with_registry(mut self, registry: DetectorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Evaluate one artifact.
    ///
    /// With `max_violations = k`, rules are applied in order until the
    /// running count reaches `k`; the rule that crosses the threshold
    /// still contributes all of its violations.
    pub fn evaluate(
        &self,
        context: &CodeContext,
        options: &EvaluationOptions,
    ) -> Result<EvaluationResult> {
        let rules = self.catalog.all_rules()?;
        let configuration = self.configuration.configuration()?;
        let selected = select_rules(context, options, &rules, &configuration);

        let mut violations: Vec<Violation> = Vec::new();
        for (applied, rule) in selected.iter().enumerate() {
            let mut found = self.registry.apply_rule(rule, context);
            if let Some(severity) = configuration.family_severity(rule.family()) {
                for v in &mut found {
                    v.severity = severity;
                }
            }
            violations.extend(found);

            if let Some(max) = options.max_violations {
                if violations.len() >= max {
                    tracing::debug!(
                        file = %context.file_path,
                        rule = %rule.id,
                        skipped = selected.len() - applied - 1,
                        "violation cap reached"
                    );
                    break;
                }
            }
        }

        let summary = Summary::from_violations(&violations);
        tracing::debug!(
            file = %context.file_path,
            violations = summary.total,
            "evaluated"
        );

        Ok(EvaluationResult {
            file_path: context.file_path.clone(),
            violations,
            summary,
        })
    }

    /// Evaluate each context independently, preserving input order.
    /// The first collaborator error aborts the batch.
    pub fn evaluate_batch(
        &self,
        contexts: &[CodeContext],
        options: &EvaluationOptions,
    ) -> Result<Vec<EvaluationResult>> {
        contexts
            .iter()
            .map(|ctx| self.evaluate(ctx, options))
            .collect()
    }
}
