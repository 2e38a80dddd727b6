use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StandardsError};
use crate::rules::catalog::Catalog;
use crate::rules::policy::Policy;
use crate::rules::Severity;

/// Supplies the active project configuration to the evaluator.
pub trait ConfigurationProvider {
    fn configuration(&self) -> Result<ProjectConfiguration>;
}

/// The configuration snapshot the selector works against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfiguration {
    /// Categories used when neither the options nor the context name one.
    #[serde(default, rename = "categories")]
    pub active_categories: BTreeSet<String>,
    /// Overrides keyed by rule family (see `Rule::family`).
    #[serde(default)]
    pub rule_families: HashMap<String, FamilyOverride>,
}

impl ProjectConfiguration {
    pub fn is_family_disabled(&self, family: &str) -> bool {
        matches!(self.rule_families.get(family), Some(FamilyOverride::Disabled))
    }

    /// Severity that replaces the catalog severity for a family, if any.
    pub fn family_severity(&self, family: &str) -> Option<Severity> {
        match self.rule_families.get(family)? {
            FamilyOverride::Error => Some(Severity::Error),
            FamilyOverride::Warning => Some(Severity::Warning),
            FamilyOverride::Info => Some(Severity::Info),
            FamilyOverride::Disabled | FamilyOverride::Enabled => None,
        }
    }
}

impl ConfigurationProvider for ProjectConfiguration {
    fn configuration(&self) -> Result<ProjectConfiguration> {
        Ok(self.clone())
    }
}

/// Per-family override value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyOverride {
    Disabled,
    Enabled,
    Error,
    Warning,
    Info,
}

/// Per-rule catalog override from `[rules."<id>"]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleOverride {
    pub enabled: Option<bool>,
    pub severity: Option<Severity>,
}

/// Extra rule definitions merged after the built-in set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub path: Option<PathBuf>,
}

/// Which files the CLI collects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesSection {
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_include() -> Vec<String> {
    vec!["**/*.c".into(), "**/*.h".into()]
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

/// Top-level configuration from `.cstandards.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub standards: ProjectConfiguration,
    #[serde(default)]
    pub rules: BTreeMap<String, RuleOverride>,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub files: FilesSection,
    #[serde(default)]
    pub policy: Policy,
    /// Directory relative paths in this config resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        if !path.exists() {
            return Ok(Self {
                base_dir,
                ..Self::default()
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.base_dir = base_dir;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// The effective catalog: built-in rules, the optional extra catalog
    /// file, then `[rules]` overrides.
    pub fn build_catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::builtin();

        if let Some(extra) = &self.catalog.path {
            let extra_path = self.base_dir.join(extra);
            let extra_catalog = Catalog::load(&extra_path).map_err(|e| {
                StandardsError::Config(format!(
                    "failed to load catalog {}: {e}",
                    extra_path.display()
                ))
            })?;
            catalog.extend(extra_catalog.rules().to_vec())?;
        }

        for (id, ov) in &self.rules {
            let rule = catalog.get_mut(id).ok_or_else(|| {
                StandardsError::Config(format!("override for unknown rule '{id}'"))
            })?;
            if let Some(enabled) = ov.enabled {
                rule.enabled = enabled;
            }
            if let Some(severity) = ov.severity {
                rule.severity = severity;
            }
        }

        Ok(catalog)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# cstandards configuration

[standards]
# Categories evaluated when none are given on the command line.
# Empty means every category.
# categories = ["memory", "safety"]

# Rule-family overrides: "disabled" drops every rule whose id ends in the
# family token; "error" / "warning" / "info" re-tag its violations.
# [standards.rule_families]
# convention = "disabled"

# Per-rule catalog overrides.
# [rules."c-style-line-length"]
# enabled = false
# severity = "warning"

# Extra [[rules]] definitions, relative to this file.
# [catalog]
# path = "rules.toml"

[files]
include = ["**/*.c", "**/*.h"]
# exclude = ["vendor/**"]

[policy]
# Minimum severity to fail the run (info, warning, error).
fail_on = "error"
"#
    }
}

impl ConfigurationProvider for Config {
    fn configuration(&self) -> Result<ProjectConfiguration> {
        Ok(self.standards.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/.cstandards.toml")).unwrap();
        assert!(config.standards.active_categories.is_empty());
        assert_eq!(config.files.include, default_include());
        assert_eq!(config.policy.fail_on, Severity::Error);
    }

    #[test]
    fn starter_toml_parses() {
        let config: Config = toml::from_str(Config::starter_toml()).unwrap();
        assert_eq!(config.policy.fail_on, Severity::Error);
    }

    #[test]
    fn parses_standards_section() {
        let config: Config = toml::from_str(
            r#"
[standards]
categories = ["memory"]

[standards.rule_families]
convention = "disabled"
length = "warning"
"#,
        )
        .unwrap();
        let project = config.configuration().unwrap();
        assert!(project.active_categories.contains("memory"));
        assert!(project.is_family_disabled("convention"));
        assert!(!project.is_family_disabled("length"));
        assert_eq!(project.family_severity("length"), Some(Severity::Warning));
    }

    #[test]
    fn rule_overrides_apply_to_catalog() {
        let config: Config = toml::from_str(
            r#"
[rules."c-style-line-length"]
enabled = false

[rules."c-naming-convention"]
severity = "error"
"#,
        )
        .unwrap();
        let catalog = config.build_catalog().unwrap();
        let rules = catalog.rules();
        let length = rules.iter().find(|r| r.id == "c-style-line-length").unwrap();
        let naming = rules.iter().find(|r| r.id == "c-naming-convention").unwrap();
        assert!(!length.enabled);
        assert_eq!(naming.severity, Severity::Error);
    }

    #[test]
    fn override_for_unknown_rule_is_error() {
        let config: Config = toml::from_str("[rules.\"no-such-rule\"]\nenabled = false\n").unwrap();
        assert!(matches!(
            config.build_catalog(),
            Err(StandardsError::Config(_))
        ));
    }

    #[test]
    fn extra_catalog_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut rules = std::fs::File::create(dir.path().join("rules.toml")).unwrap();
        writeln!(
            rules,
            "[[rules]]\nid = \"team-memory-free\"\nname = \"Free\"\nseverity = \"warning\"\nstrategy = \"memory\""
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".cstandards.toml"),
            "[catalog]\npath = \"rules.toml\"\n",
        )
        .unwrap();

        let config = Config::load(&dir.path().join(".cstandards.toml")).unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(
            catalog.rules().last().map(|r| r.id.as_str()),
            Some("team-memory-free")
        );
    }
}
