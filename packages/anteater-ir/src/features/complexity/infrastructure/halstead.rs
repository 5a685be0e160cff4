//! Halstead operator/operand tally (spec §4.7): one pass classifying every
//! node as an operator, an operand, or neither, keyed by its token text so
//! that e.g. two `+` nodes count as one distinct operator.

use crate::features::complexity::domain::HalsteadMetrics;
use crate::shared::ast::{AstVisitor, NodeId, NodeKind};
use ahash::AHashSet;

pub struct HalsteadCalculator<'a, V: AstVisitor> {
    ast: &'a V,
}

impl<'a, V: AstVisitor> HalsteadCalculator<'a, V> {
    pub fn new(ast: &'a V) -> Self {
        Self { ast }
    }

    pub fn calculate(&self, body: NodeId) -> HalsteadMetrics {
        let mut operators: AHashSet<String> = AHashSet::new();
        let mut operands: AHashSet<String> = AHashSet::new();
        let mut total_operators = 0u32;
        let mut total_operands = 0u32;

        self.walk(body, &mut operators, &mut operands, &mut total_operators, &mut total_operands);

        HalsteadMetrics {
            distinct_operators: operators.len() as u32,
            distinct_operands: operands.len() as u32,
            total_operators,
            total_operands,
        }
    }

    fn walk(
        &self,
        node: NodeId,
        operators: &mut AHashSet<String>,
        operands: &mut AHashSet<String>,
        total_operators: &mut u32,
        total_operands: &mut u32,
    ) {
        let kind = self.ast.kind(node);
        if let Some(token) = self.operator_token(node, kind) {
            operators.insert(token);
            *total_operators += 1;
        } else if let Some(token) = self.operand_token(node, kind) {
            operands.insert(token);
            *total_operands += 1;
        }

        for child in self.ast.children(node) {
            self.walk(child, operators, operands, total_operators, total_operands);
        }
    }

    fn operator_token(&self, node: NodeId, kind: NodeKind) -> Option<String> {
        match kind {
            NodeKind::BinaryExpr | NodeKind::UnaryExpr | NodeKind::Assignment => {
                Some(self.ast.lexeme(node).unwrap_or("op").to_string())
            }
            NodeKind::LogicalAnd => Some("&&".to_string()),
            NodeKind::LogicalOr => Some("||".to_string()),
            NodeKind::TernaryExpr => Some("?:".to_string()),
            NodeKind::CallExpr => Some("()".to_string()),
            NodeKind::IndexAccess => Some("[]".to_string()),
            NodeKind::CastExpr => Some("cast".to_string()),
            NodeKind::NewExpr => Some("new".to_string()),
            NodeKind::NullCheck => Some("?.".to_string()),
            _ => None,
        }
    }

    fn operand_token(&self, node: NodeId, kind: NodeKind) -> Option<String> {
        match kind {
            NodeKind::Identifier | NodeKind::Literal => {
                Some(self.ast.lexeme(node).map(str::to_string).unwrap_or_else(|| {
                    self.ast.source_text(self.ast.range(node)).to_string()
                }))
            }
            NodeKind::NullLiteral => Some("null".to_string()),
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
    fn repeated_operator_counts_once_distinct_but_twice_total() {
        // a + b + c: BinaryExpr(+) { a, BinaryExpr(+) { b, c } }
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::BinaryExpr);
        kinds.insert(1, NodeKind::Identifier);
        kinds.insert(2, NodeKind::BinaryExpr);
        kinds.insert(3, NodeKind::Identifier);
        kinds.insert(4, NodeKind::Identifier);
        let mut children = HashMap::new();
        children.insert(0, vec![1, 2]);
        children.insert(2, vec![3, 4]);
        let mut lexemes = HashMap::new();
        lexemes.insert(0, "+".to_string());
        lexemes.insert(1, "a".to_string());
        lexemes.insert(2, "+".to_string());
        lexemes.insert(3, "b".to_string());
        lexemes.insert(4, "c".to_string());
        let ast = FakeAst { kinds, children, lexemes };

        let metrics = HalsteadCalculator::new(&ast).calculate(0);
        assert_eq!(metrics.distinct_operators, 1);
        assert_eq!(metrics.total_operators, 2);
        assert_eq!(metrics.distinct_operands, 3);
        assert_eq!(metrics.total_operands, 3);
    }

    #[test]
    fn single_symbol_vocabulary_yields_zero_volume() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::Identifier);
        let mut lexemes = HashMap::new();
        lexemes.insert(0, "x".to_string());
        let ast = FakeAst { kinds, children: HashMap::new(), lexemes };

        let metrics = HalsteadCalculator::new(&ast).calculate(0);
        assert_eq!(metrics.volume(), 0.0);
    }
}
