//! Finds analyzable functions within one file's AST.

use crate::shared::ast::{AstVisitor, NodeId, NodeKind};

/// One function found in a file: its declared name (or a positional
/// fallback), the `FunctionDecl` node itself, and its body block.
pub struct FoundFunction {
    pub name: String,
    pub decl: NodeId,
    pub body: NodeId,
}

/// Walks the whole file tree and collects every `FunctionDecl`, pairing it
/// with the `Block` among its direct children that is its body. Nested
/// function declarations are visited too: each is analyzed independently,
/// consistent with spec §5's "per-file analyses share no mutable state".
pub fn find_functions<V: AstVisitor>(ast: &V, root: NodeId) -> Vec<FoundFunction> {
    let mut found = Vec::new();
    walk(ast, root, &mut found);
    found
}

fn walk<V: AstVisitor>(ast: &V, node: NodeId, found: &mut Vec<FoundFunction>) {
    if ast.kind(node) == NodeKind::FunctionDecl {
        let children = ast.children(node);
        if let Some(&body) = children.iter().find(|&&child| ast.kind(child) == NodeKind::Block) {
            let name = ast.lexeme(node).map(str::to_string).unwrap_or_else(|| format!("fn@{node}"));
            found.push(FoundFunction { name, decl: node, body });
        }
    }
    for child in ast.children(node) {
        walk(ast, child, found);
    }
}
