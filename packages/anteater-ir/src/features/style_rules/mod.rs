//! C9: Style Rules & Rule Runner (spec §4.8).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::run_style_rules;
pub use domain::Violation;
pub use infrastructure::{RuleRegistry, RuleRunner, StyleRule, BUILTIN_RULE_IDS};
