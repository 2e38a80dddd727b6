pub mod builtin;
pub mod catalog;
pub mod policy;
pub mod selector;
pub mod violation;

pub use builtin::{DetectorRegistry, LineCheck};
pub use catalog::{Catalog, RuleCatalog};
pub use selector::select_rules;
pub use violation::{DetectionStrategy, Rule, Severity, Violation};
