//! Representative built-in rules (spec §4.8). Each one's contract is its
//! detection predicate; normative behaviors mirror `example/rules/quality/*`.

use super::rule::{RuleContext, StyleRule};
use crate::features::style_rules::domain::Violation;
use crate::shared::ast::{NodeId, NodeKind};
use crate::shared::models::Severity;

/// Flags `(T)(T)x` - a cast immediately re-applying the same target type
/// text as its own operand's cast. Without type inference (a Non-goal) this
/// is the only unnecessary-cast shape detectable from syntax alone.
pub struct AvoidUnnecessaryCast;

impl StyleRule for AvoidUnnecessaryCast {
    fn id(&self) -> &'static str {
        "avoid-unnecessary-cast"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::CastExpr]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let Some(outer_type) = ctx.ast.lexeme(node) else {
            return Vec::new();
        };
        let Some(&inner) = ctx.ast.children(node).first() else {
            return Vec::new();
        };
        if ctx.ast.kind(inner) != NodeKind::CastExpr {
            return Vec::new();
        }
        let Some(inner_type) = ctx.ast.lexeme(inner) else {
            return Vec::new();
        };
        if outer_type != inner_type {
            return Vec::new();
        }

        vec![Violation::new(
            self.id(),
            self.default_severity(),
            format!("redundant cast to `{outer_type}` of an already-cast expression"),
            ctx.ast.range(node),
        )
        .with_suggestion(format!("drop the outer `({outer_type})` cast"))]
    }
}

/// Flags a comparison with a literal on the left ("Yoda condition"):
/// `1 == x` instead of `x == 1`.
pub struct BinaryExpressionOrder;

impl StyleRule for BinaryExpressionOrder {
    fn id(&self) -> &'static str {
        "binary-expression-order"
    }

    fn default_severity(&self) -> Severity {
        Severity::Hint
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::BinaryExpr]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let is_comparison = matches!(ctx.ast.lexeme(node), Some("==") | Some("!="));
        if !is_comparison {
            return Vec::new();
        }
        let children = ctx.ast.children(node);
        let (Some(&left), Some(&right)) = (children.first(), children.get(1)) else {
            return Vec::new();
        };
        let left_is_literal = matches!(ctx.ast.kind(left), NodeKind::Literal | NodeKind::NullLiteral);
        let right_is_literal = matches!(ctx.ast.kind(right), NodeKind::Literal | NodeKind::NullLiteral);
        if !left_is_literal || right_is_literal {
            return Vec::new();
        }

        vec![Violation::new(
            self.id(),
            self.default_severity(),
            "comparison has the literal on the left; prefer `value op literal`",
            ctx.ast.range(node),
        )
        .with_suggestion("swap the operands")]
    }
}

/// Flags `if (cond) { return true; } else { return false; }` (or the
/// inverse) - the condition can be returned directly.
pub struct NoEqualThenElse;

impl StyleRule for NoEqualThenElse {
    fn id(&self) -> &'static str {
        "no-equal-then-else"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::IfStmt]
    }

    fn check(&self, node: NodeId, ctx: &RuleContext<'_>) -> Vec<Violation> {
        let children = ctx.ast.children(node);
        let (Some(&then_branch), Some(&else_branch)) = (children.get(1), children.get(2)) else {
            return Vec::new();
        };

        let (Some(then_bool), Some(else_bool)) = (
            self.sole_returned_bool(ctx, then_branch),
            self.sole_returned_bool(ctx, else_branch),
        ) else {
            return Vec::new();
        };

        if then_bool == else_bool {
            return Vec::new();
        }

        vec![Violation::new(
            self.id(),
            self.default_severity(),
            "if/else returns boolean literals mirroring the condition",
            ctx.ast.range(node),
        )
        .with_suggestion("return the condition expression directly")]
    }
}

impl NoEqualThenElse {
    /// Unwraps `{ return true; }` / `{ return false; }`, tolerating a bare
    /// `return` statement not wrapped in a block.
    fn sole_returned_bool(&self, ctx: &RuleContext<'_>, branch: NodeId) -> Option<bool> {
        let return_stmt = match ctx.ast.kind(branch) {
            NodeKind::ReturnStmt => branch,
            NodeKind::Block => {
                let stmts = ctx.ast.children(branch);
                if stmts.len() != 1 {
                    return None;
                }
                stmts[0]
            }
            _ => return None,
        };
        if ctx.ast.kind(return_stmt) != NodeKind::ReturnStmt {
            return None;
        }
        let &literal = ctx.ast.children(return_stmt).first()?;
        if ctx.ast.kind(literal) != NodeKind::Literal {
            return None;
        }
        match ctx.ast.lexeme(literal)? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
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

    impl crate::shared::ast::AstVisitor for FakeAst {
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
    fn double_cast_to_same_type_is_flagged() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::CastExpr);
        kinds.insert(1, NodeKind::CastExpr);
        let mut children = HashMap::new();
        children.insert(0, vec![1]);
        let mut lexemes = HashMap::new();
        lexemes.insert(0, "Foo".to_string());
        lexemes.insert(1, "Foo".to_string());
        let ast = FakeAst { kinds, children, lexemes };
        let ctx = RuleContext { ast: &ast };

        let violations = AvoidUnnecessaryCast.check(0, &ctx);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn yoda_equality_is_flagged() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::BinaryExpr);
        kinds.insert(1, NodeKind::Literal);
        kinds.insert(2, NodeKind::Identifier);
        let mut children = HashMap::new();
        children.insert(0, vec![1, 2]);
        let mut lexemes = HashMap::new();
        lexemes.insert(0, "==".to_string());
        let ast = FakeAst { kinds, children, lexemes };
        let ctx = RuleContext { ast: &ast };

        let violations = BinaryExpressionOrder.check(0, &ctx);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn equality_with_literal_on_right_is_not_flagged() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::BinaryExpr);
        kinds.insert(1, NodeKind::Identifier);
        kinds.insert(2, NodeKind::Literal);
        let mut children = HashMap::new();
        children.insert(0, vec![1, 2]);
        let mut lexemes = HashMap::new();
        lexemes.insert(0, "==".to_string());
        let ast = FakeAst { kinds, children, lexemes };
        let ctx = RuleContext { ast: &ast };

        assert!(BinaryExpressionOrder.check(0, &ctx).is_empty());
    }

    #[test]
    fn if_true_else_false_is_flagged() {
        // If(0) { cond(1), Block(2){Return(4){Literal(6,"true")}}, Block(3){Return(5){Literal(7,"false")}} }
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::IfStmt);
        kinds.insert(1, NodeKind::Identifier);
        kinds.insert(2, NodeKind::Block);
        kinds.insert(3, NodeKind::Block);
        kinds.insert(4, NodeKind::ReturnStmt);
        kinds.insert(5, NodeKind::ReturnStmt);
        kinds.insert(6, NodeKind::Literal);
        kinds.insert(7, NodeKind::Literal);
        let mut children = HashMap::new();
        children.insert(0, vec![1, 2, 3]);
        children.insert(2, vec![4]);
        children.insert(3, vec![5]);
        children.insert(4, vec![6]);
        children.insert(5, vec![7]);
        let mut lexemes = HashMap::new();
        lexemes.insert(6, "true".to_string());
        lexemes.insert(7, "false".to_string());
        let ast = FakeAst { kinds, children, lexemes };
        let ctx = RuleContext { ast: &ast };

        let violations = NoEqualThenElse.check(0, &ctx);
        assert_eq!(violations.len(), 1);
    }
}
