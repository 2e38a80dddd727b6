use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::{DetectionStrategy, Rule, Severity};
use crate::error::{Result, StandardsError};

/// Source of rule definitions consumed by the evaluator.
///
/// Implementations return every known rule, unfiltered, in catalog order.
pub trait RuleCatalog {
    fn all_rules(&self) -> Result<Vec<Rule>>;
}

/// An ordered, in-memory rule catalog with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rules: Vec<Rule>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    rules: Vec<Rule>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate rule ids.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut catalog = Self::default();
        catalog.extend(rules)?;
        Ok(catalog)
    }

    /// The C rule set shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Parse a catalog from a TOML document with a `[[rules]]` array.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.rules)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Append rules after the existing ones, keeping ids unique.
    pub fn extend(&mut self, rules: Vec<Rule>) -> Result<()> {
        let mut seen: HashSet<String> = self.rules.iter().map(|r| r.id.clone()).collect();
        for rule in &rules {
            if !seen.insert(rule.id.clone()) {
                return Err(StandardsError::Catalog(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
        }
        self.rules.extend(rules);
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.id == id)
    }
}

impl RuleCatalog for Catalog {
    fn all_rules(&self) -> Result<Vec<Rule>> {
        Ok(self.rules.clone())
    }
}

fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "c-naming-convention",
            "Function Naming Convention",
            Severity::Warning,
            DetectionStrategy::Naming,
        )
        .with_categories(&["naming", "style"])
        .with_description("Functions use snake_case names, not camelCase"),
        Rule::new(
            "c-memory-allocation",
            "Unchecked Allocation",
            Severity::Error,
            DetectionStrategy::Memory,
        )
        .with_categories(&["memory", "safety", "systems", "embedded", "kernel"])
        .with_description("Every allocation result is checked against NULL before use"),
        Rule::new(
            "c-unsafe-string",
            "Unbounded String Function",
            Severity::Error,
            DetectionStrategy::UnsafeFunction,
        )
        .with_categories(&["security", "safety", "networking"])
        .with_description("Use bounded string functions that take a destination size"),
        Rule::new(
            "c-style-line-length",
            "Line Length",
            Severity::Info,
            DetectionStrategy::LineLength,
        )
        .with_categories(&["style", "legacy"])
        .with_description("Lines stay within 100 characters"),
        Rule::new(
            "c-doc-function-comments",
            "Function Documentation",
            Severity::Info,
            DetectionStrategy::Manual,
        )
        .with_categories(&["documentation"])
        .with_description("Public functions carry a comment describing contract and ownership")
        .disabled(),
    ]
}
