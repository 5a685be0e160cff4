use crate::config::RuleConfig;
use crate::features::style_rules::domain::Violation;
use crate::features::style_rules::infrastructure::{RuleRegistry, RuleRunner};
use crate::shared::ast::{AstVisitor, NodeId};

pub fn run_style_rules<V: AstVisitor>(ast: &V, root: NodeId, registry: &RuleRegistry, config: &RuleConfig) -> Vec<Violation> {
    RuleRunner::new(registry, config).run(ast, root)
}
