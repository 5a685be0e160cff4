//! Walks the AST once, dispatching each node to the rules interested in its
//! kind (spec §4.8). Exclusion/inclusion and severity overrides come from
//! the run's `RuleConfig`; rules themselves stay ignorant of configuration.

use super::registry::RuleRegistry;
use super::rule::RuleContext;
use crate::config::RuleConfig;
use crate::features::style_rules::domain::Violation;
use crate::shared::ast::{AstVisitor, NodeId, NodeKind};
use ahash::AHashMap;

pub struct RuleRunner<'a> {
    registry: &'a RuleRegistry,
    config: &'a RuleConfig,
    by_kind: AHashMap<NodeKind, Vec<usize>>,
}

impl<'a> RuleRunner<'a> {
    pub fn new(registry: &'a RuleRegistry, config: &'a RuleConfig) -> Self {
        let mut by_kind: AHashMap<NodeKind, Vec<usize>> = AHashMap::new();
        for (idx, rule) in registry.rules().iter().enumerate() {
            if !config.is_active(rule.id()) {
                continue;
            }
            for &kind in rule.node_kinds() {
                by_kind.entry(kind).or_default().push(idx);
            }
        }
        Self { registry, config, by_kind }
    }

    pub fn run<V: AstVisitor>(&self, ast: &V, root: NodeId) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.walk(ast, root, &mut violations);
        violations.sort_by(|a, b| {
            a.span.start.line.cmp(&b.span.start.line).then(a.span.start.column.cmp(&b.span.start.column))
        });
        violations
    }

    fn walk<V: AstVisitor>(&self, ast: &V, node: NodeId, out: &mut Vec<Violation>) {
        let kind = ast.kind(node);
        if let Some(indices) = self.by_kind.get(&kind) {
            let ctx = RuleContext { ast };
            for &idx in indices {
                let rule = &self.registry.rules()[idx];
                for mut violation in rule.check(node, &ctx) {
                    violation.severity = self.config.severity_for(rule.id(), violation.severity);
                    out.push(violation);
                }
            }
        }
        for child in ast.children(node) {
            self.walk(ast, child, out);
        }
    }
}
