//! The immutable rule set, constructed once per run (spec §5: "rule
//! registries... are immutable after construction and may be freely
//! shared").

use super::rule::StyleRule;
use super::rules::{AvoidUnnecessaryCast, BinaryExpressionOrder, NoEqualThenElse};

/// Stable rule-id universe, referenced by `config::RunConfig` validation to
/// reject unknown severity overrides (spec §6).
pub const BUILTIN_RULE_IDS: &[&str] = &["avoid-unnecessary-cast", "binary-expression-order", "no-equal-then-else"];

pub struct RuleRegistry {
    rules: Vec<Box<dyn StyleRule>>,
}

impl RuleRegistry {
    pub fn with_defaults() -> Self {
        Self {
            rules: vec![
                Box::new(AvoidUnnecessaryCast),
                Box::new(BinaryExpressionOrder),
                Box::new(NoEqualThenElse),
            ],
        }
    }

    pub fn rules(&self) -> &[Box<dyn StyleRule>] {
        &self.rules
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_match_the_registered_rules() {
        let registry = RuleRegistry::with_defaults();
        let ids: Vec<&str> = registry.rules().iter().map(|r| r.id()).collect();
        for id in BUILTIN_RULE_IDS {
            assert!(ids.contains(id), "missing rule {id}");
        }
    }
}
