mod registry;
mod rule;
mod rules;
mod runner;

pub use registry::{RuleRegistry, BUILTIN_RULE_IDS};
pub use rule::{RuleContext, StyleRule};
pub use rules::{AvoidUnnecessaryCast, BinaryExpressionOrder, NoEqualThenElse};
pub use runner::RuleRunner;
