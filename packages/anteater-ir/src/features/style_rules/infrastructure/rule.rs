//! The per-rule contract (spec §4.8): `{id, severity, nodeKinds}` plus a
//! pure `check(node, ctx) -> Violations`. Rules only read the AST and
//! source text - no mutation, no cross-rule state.

use crate::features::style_rules::domain::Violation;
use crate::shared::ast::{AstVisitor, NodeId, NodeKind};
use crate::shared::models::Severity;

pub struct RuleContext<'a> {
    pub ast: &'a dyn AstVisitor,
}

pub trait StyleRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn default_severity(&self) -> Severity;
    fn node_kinds(&self) -> &'static [NodeKind];
    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Violation>;
}
