//! AST-pattern debt detectors (spec §4.9): `as dynamic` casts, deprecated
//! annotations, ignore pragmas, empty catch blocks, god-object heuristics.
//!
//! The core's `AstVisitor` surface has no `ClassDecl` node kind - it was
//! built around a single function body (spec §3's CFG is per-function).
//! The god-class detector therefore treats *any* node whose direct
//! children include more than `threshold` `FunctionDecl`/`VarDecl` members
//! as a god-object candidate, rather than requiring a dedicated class
//! node. See DESIGN.md.

use crate::features::debt::domain::{DebtItem, DebtType};
use crate::shared::ast::{AstVisitor, NodeId, NodeKind};

pub fn detect_ast_debt<V: AstVisitor>(ast: &V, root: NodeId, god_class_threshold: u32) -> Vec<DebtItem> {
    let mut items = Vec::new();
    walk(ast, root, god_class_threshold, &mut items);
    items
}

fn walk<V: AstVisitor>(ast: &V, node: NodeId, god_class_threshold: u32, out: &mut Vec<DebtItem>) {
    let children = ast.children(node);

    match ast.kind(node) {
        NodeKind::CastExpr => {
            if ast.lexeme(node) == Some("dynamic") {
                out.push(item(DebtType::AsDynamic, "cast to `dynamic` defeats static checking", ast, node));
            }
        }
        NodeKind::Annotation => {
            if let Some(name) = ast.lexeme(node) {
                let lowered = name.to_ascii_lowercase();
                if lowered.contains("deprecated") {
                    out.push(item(DebtType::Deprecated, "use of a deprecated member", ast, node));
                } else if lowered.contains("ignore") || lowered.contains("suppress") {
                    out.push(item(DebtType::Ignore, "diagnostic suppressed via pragma", ast, node));
                }
            }
        }
        NodeKind::CatchClause => {
            if let Some(&body) = children.last() {
                if ast.kind(body) == NodeKind::Block && ast.children(body).is_empty() {
                    out.push(item(DebtType::EmptyCatch, "catch block swallows the exception silently", ast, node));
                }
            }
        }
        _ => {}
    }

    let member_count = children
        .iter()
        .filter(|&&c| matches!(ast.kind(c), NodeKind::FunctionDecl | NodeKind::VarDecl))
        .count() as u32;
    if member_count > god_class_threshold {
        out.push(item(
            DebtType::GodClass,
            &format!("{member_count} members exceeds the god-object threshold of {god_class_threshold}"),
            ast,
            node,
        ));
    }

    for child in children {
        walk(ast, child, god_class_threshold, out);
    }
}

fn item<V: AstVisitor>(debt_type: DebtType, message: &str, ast: &V, node: NodeId) -> DebtItem {
    DebtItem {
        debt_type,
        severity: debt_type.default_severity(),
        message: message.to_string(),
        span: ast.range(node),
        cost: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Span;
    use std::collections::HashMap;

    struct FakeAst {
        kinds: HashMap<NodeId, NodeKind>,
        children: HashMap<NodeId, Vec<NodeId>>,
        lexemes: HashMap<NodeId, String>,
    }

    impl AstVisitor for FakeAst {
        fn kind(&self, node: NodeId) -> NodeKind {
            self.kinds[&node]
        }
        fn children(&self, node: NodeId) -> Vec<NodeId> {
            self.children.get(&node).cloned().unwrap_or_default()
        }
        fn range(&self, _node: NodeId) -> Span {
            Span::default()
        }
        fn lexeme(&self, node: NodeId) -> Option<&str> {
            self.lexemes.get(&node).map(|s| s.as_str())
        }
        fn source_text(&self, _range: Span) -> &str {
            ""
        }
    }

    #[test]
    fn empty_catch_block_is_flagged() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::CatchClause);
        kinds.insert(1, NodeKind::Block);
        let mut children = HashMap::new();
        children.insert(0, vec![1]);
        let ast = FakeAst { kinds, children, lexemes: HashMap::new() };

        let items = detect_ast_debt(&ast, 0, 10);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].debt_type, DebtType::EmptyCatch);
    }

    #[test]
    fn dynamic_cast_is_flagged() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::CastExpr);
        let mut lexemes = HashMap::new();
        lexemes.insert(0, "dynamic".to_string());
        let ast = FakeAst { kinds, children: HashMap::new(), lexemes };

        let items = detect_ast_debt(&ast, 0, 10);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].debt_type, DebtType::AsDynamic);
    }

    #[test]
    fn too_many_members_trips_god_class() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::Block);
        for i in 1..=4 {
            kinds.insert(i, NodeKind::FunctionDecl);
        }
        let mut children = HashMap::new();
        children.insert(0, vec![1, 2, 3, 4]);
        let ast = FakeAst { kinds, children, lexemes: HashMap::new() };

        let items = detect_ast_debt(&ast, 0, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].debt_type, DebtType::GodClass);
    }
}
