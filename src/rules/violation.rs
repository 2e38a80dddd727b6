use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single coding-standard violation produced by a line check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the rule that fired (e.g., "c-naming-convention").
    pub rule_id: String,
    /// Human-readable rule name.
    pub rule_name: String,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description of the violation.
    pub message: String,
    /// 1-based line number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column, when the check can compute it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Suggested remediation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Severity ordering is `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" | "note" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "error" | "err" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Which line check a rule is evaluated with.
///
/// Every rule carries its strategy explicitly; the detector registry looks
/// checks up by this tag, never by the rule id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStrategy {
    /// Mixed-case function names at call or definition sites.
    Naming,
    /// Allocation calls without a same-line result check.
    Memory,
    /// Unbounded string functions (`gets`, `strcpy`, ...).
    UnsafeFunction,
    /// Overlong lines.
    LineLength,
    /// Prose-only standard with no automated check.
    #[default]
    Manual,
}

impl std::fmt::Display for DetectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Naming => write!(f, "naming"),
            Self::Memory => write!(f, "memory"),
            Self::UnsafeFunction => write!(f, "unsafe_function"),
            Self::LineLength => write!(f, "line_length"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Characters that separate tokens inside a rule id.
const FAMILY_SEPARATORS: &[char] = &['-', '_', '.', '/', ':'];

/// A catalog rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Globally unique, stable identifier.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    pub severity: Severity,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub strategy: DetectionStrategy,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    pub fn new(id: &str, name: &str, severity: Severity, strategy: DetectionStrategy) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            categories: BTreeSet::new(),
            severity,
            enabled: true,
            strategy,
        }
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| (*c).to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The rule family: the token after the last separator in the id.
    ///
    /// `"c-naming-convention"` belongs to family `"convention"`. An id with
    /// no separator is its own family.
    pub fn family(&self) -> &str {
        self.id
            .rsplit(FAMILY_SEPARATORS)
            .next()
            .unwrap_or(&self.id)
    }

    /// Build a violation attributed to this rule.
    pub fn violation(&self, line: usize, message: String) -> Violation {
        Violation {
            rule_id: self.id.clone(),
            rule_name: self.name.clone(),
            severity: self.severity,
            message,
            line: Some(line),
            column: None,
            suggestion: None,
        }
    }
}

impl Violation {
    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}
