//! Rule selection.
//!
//! Narrows the catalog to the rules that apply to one artifact. Stages run
//! in a fixed order and only ever remove rules:
//!
//! 1. enablement (when `enabled_only`)
//! 2. category intersection
//! 3. exact severity match
//! 4. rule-family `disabled` overrides
//!
//! Catalog order is preserved.

use std::collections::BTreeSet;

use super::Rule;
use crate::config::ProjectConfiguration;
use crate::engine::EvaluationOptions;
use crate::ir::CodeContext;

/// Select the rules that apply to `context`, in catalog order.
pub fn select_rules<'a>(
    context: &CodeContext,
    options: &EvaluationOptions,
    rules: &'a [Rule],
    configuration: &ProjectConfiguration,
) -> Vec<&'a Rule> {
    let categories = effective_categories(context, options, configuration);

    let selected: Vec<&Rule> = rules
        .iter()
        .filter(|r| !options.enabled_only || r.enabled)
        .filter(|r| categories.is_empty() || !r.categories.is_disjoint(&categories))
        .filter(|r| options.severity.map_or(true, |sev| r.severity == sev))
        .filter(|r| !configuration.is_family_disabled(r.family()))
        .collect();

    tracing::debug!(
        file = %context.file_path,
        catalog = rules.len(),
        selected = selected.len(),
        "selected rules"
    );

    selected
}

/// Options win over the context category, which wins over the project's
/// active categories.
fn effective_categories(
    context: &CodeContext,
    options: &EvaluationOptions,
    configuration: &ProjectConfiguration,
) -> BTreeSet<String> {
    if let Some(categories) = &options.categories {
        return categories.clone();
    }
    if let Some(category) = &context.category {
        return BTreeSet::from([category.clone()]);
    }
    configuration.active_categories.clone()
}
