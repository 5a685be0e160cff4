//! Single recursive walk over a function body computing cyclomatic and
//! cognitive complexity together (spec §4.7) - both need the same nesting
//! traversal, so one pass serves both rather than two independent ones.

use crate::features::complexity::domain::ComplexityMetrics;
use crate::shared::ast::{AstVisitor, NodeId, NodeKind};

pub struct ComplexityCalculator<'a, V: AstVisitor> {
    ast: &'a V,
    function_name: Option<&'a str>,
}

impl<'a, V: AstVisitor> ComplexityCalculator<'a, V> {
    pub fn new(ast: &'a V, function_name: Option<&'a str>) -> Self {
        Self { ast, function_name }
    }

    pub fn calculate(&self, body: NodeId) -> ComplexityMetrics {
        let mut cyclomatic = 1;
        let mut cognitive = 0;
        self.walk(body, 0, None, &mut cyclomatic, &mut cognitive);
        ComplexityMetrics { cyclomatic, cognitive }
    }

    fn walk(&self, node: NodeId, nesting: u32, logical_run: Option<NodeKind>, cyclomatic: &mut u32, cognitive: &mut u32) {
        let kind = self.ast.kind(node);

        if let NodeKind::LogicalAnd | NodeKind::LogicalOr = kind {
            *cyclomatic += 1;
            if logical_run != Some(kind) {
                *cognitive += 1;
            }
            for child in self.ast.children(node) {
                self.walk(child, nesting, Some(kind), cyclomatic, cognitive);
            }
            return;
        }

        let mut next_nesting = nesting;
        match kind {
            NodeKind::IfStmt | NodeKind::WhileStmt | NodeKind::ForStmt | NodeKind::CaseArm | NodeKind::CatchClause => {
                *cyclomatic += 1;
                *cognitive += 1 + nesting;
                next_nesting = nesting + 1;
            }
            NodeKind::TernaryExpr => {
                *cyclomatic += 1;
                *cognitive += 1 + nesting;
            }
            NodeKind::SwitchStmt => {
                next_nesting = nesting + 1;
            }
            NodeKind::CallExpr => {
                if self.is_recursive_call(node) {
                    *cognitive += 1;
                }
            }
            _ => {}
        }

        for child in self.ast.children(node) {
            self.walk(child, next_nesting, None, cyclomatic, cognitive);
        }
    }

    fn is_recursive_call(&self, call: NodeId) -> bool {
        let Some(name) = self.function_name else {
            return false;
        };
        self.ast
            .children(call)
            .first()
            .and_then(|&callee| self.ast.lexeme(callee))
            .is_some_and(|lexeme| lexeme == name)
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
    fn straight_line_body_has_complexity_one() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::Block);
        let ast = FakeAst { kinds, children: HashMap::new(), lexemes: HashMap::new() };
        let metrics = ComplexityCalculator::new(&ast, None).calculate(0);
        assert_eq!(metrics.cyclomatic, 1);
        assert_eq!(metrics.cognitive, 0);
    }

    #[test]
    fn nested_if_adds_nesting_weight_to_cognitive() {
        // Block(0) -> If(1) -> If(2)
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::Block);
        kinds.insert(1, NodeKind::IfStmt);
        kinds.insert(2, NodeKind::IfStmt);
        let mut children = HashMap::new();
        children.insert(0, vec![1]);
        children.insert(1, vec![2]);
        let ast = FakeAst { kinds, children, lexemes: HashMap::new() };

        let metrics = ComplexityCalculator::new(&ast, None).calculate(0);
        assert_eq!(metrics.cyclomatic, 3); // 1 base + 2 ifs
        assert_eq!(metrics.cognitive, 1 + 2); // outer if: +1, inner if: +1+1 nesting
    }

    #[test]
    fn chained_logical_and_counts_once() {
        // a && b && c, right-associated: And(1){a, And(2){b, c}}
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::Block);
        kinds.insert(1, NodeKind::LogicalAnd);
        kinds.insert(2, NodeKind::Identifier);
        kinds.insert(3, NodeKind::LogicalAnd);
        kinds.insert(4, NodeKind::Identifier);
        kinds.insert(5, NodeKind::Identifier);
        let mut children = HashMap::new();
        children.insert(0, vec![1]);
        children.insert(1, vec![2, 3]);
        children.insert(3, vec![4, 5]);
        let ast = FakeAst { kinds, children, lexemes: HashMap::new() };

        let metrics = ComplexityCalculator::new(&ast, None).calculate(0);
        assert_eq!(metrics.cyclomatic, 3); // base 1 + 2 `&&` operators
        assert_eq!(metrics.cognitive, 1); // one run, counted once
    }

    #[test]
    fn direct_recursive_call_adds_one() {
        let mut kinds = HashMap::new();
        kinds.insert(0, NodeKind::Block);
        kinds.insert(1, NodeKind::CallExpr);
        kinds.insert(2, NodeKind::Identifier);
        let mut children = HashMap::new();
        children.insert(0, vec![1]);
        children.insert(1, vec![2]);
        let mut lexemes = HashMap::new();
        lexemes.insert(2, "fib".to_string());
        let ast = FakeAst { kinds, children, lexemes };

        let metrics = ComplexityCalculator::new(&ast, Some("fib")).calculate(0);
        assert_eq!(metrics.cognitive, 1);
    }
}
