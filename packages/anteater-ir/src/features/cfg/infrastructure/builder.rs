/*
 * CFG Builder (spec §4.1)
 *
 * Structured-statement lowering: each statement kind contributes its own
 * blocks and edges per the construction rules below. Block ids are
 * assigned in depth-first preorder of construction (the function's entry
 * and exit blocks are reserved first so that early `return`/`throw`
 * statements always have somewhere to jump); successor order follows
 * source order (then-before-else, cases in source order).
 *
 * AST shape conventions this builder relies on (the parser is an external
 * collaborator - these are the contract the adapter must honor):
 * - `IfStmt`:     [cond, then, else?]
 * - `WhileStmt`:  [cond, body]
 * - `ForStmt`:    [init, cond, update, body]
 * - `SwitchStmt`: [subject, case/default...]; a case node whose `lexeme`
 *                 is `"default"` is the default arm.
 * - `TryStmt`:    [tryBody, catchClause*, finallyClause?]
 *
 * Finally handling: the finally body is lowered once and *referenced* from
 * every exit path of its try (normal fall-through, the try's own
 * return/throw/break/continue, and the catch body's), rather than
 * duplicated per path - an accepted resolution of the spec's open question
 * on this point (see DESIGN.md).
 *
 * Only the nearest enclosing catch clause is modeled when a try has more
 * than one; multiple catch clauses are merged onto the first clause's
 * body, since this core does not carry enough type information to
 * dispatch between them.
 */

use super::errors::{CfgBuildError, CfgResult};
use crate::features::cfg::domain::{Block, BlockKind, Cfg, Instruction, OperationTag};
use crate::shared::ast::{AstVisitor, NodeId, NodeKind};
use crate::shared::models::{BlockId, InstructionId, ScopeId, Symbol, SymbolId, TypeTag};
use ahash::AHashMap as HashMap;
use std::collections::BTreeSet;

struct LoopCtx {
    header: BlockId,
    exit: BlockId,
}

/// Builds one function's CFG from its AST body.
pub struct CfgBuilder<'a, V: AstVisitor> {
    ast: &'a V,
    function_id: String,
    entry: BlockId,
    exit: BlockId,
    blocks: Vec<Block>,
    instructions: Vec<Instruction>,
    symbols: Vec<Symbol>,
    symbols_by_name: HashMap<String, SymbolId>,
    next_temp: u32,
    loop_stack: Vec<LoopCtx>,
    catch_stack: Vec<BlockId>,
    finally_stack: Vec<(BlockId, Option<BlockId>)>,
    allow_switch_fallthrough: bool,
}

impl<'a, V: AstVisitor> CfgBuilder<'a, V> {
    pub fn new(ast: &'a V, function_id: impl Into<String>) -> Self {
        Self::with_options(ast, function_id, false)
    }

    pub fn with_options(
        ast: &'a V,
        function_id: impl Into<String>,
        allow_switch_fallthrough: bool,
    ) -> Self {
        let mut builder = Self {
            ast,
            function_id: function_id.into(),
            entry: BlockId(0),
            exit: BlockId(1),
            blocks: Vec::new(),
            instructions: Vec::new(),
            symbols: Vec::new(),
            symbols_by_name: HashMap::new(),
            next_temp: 0,
            loop_stack: Vec::new(),
            catch_stack: Vec::new(),
            finally_stack: Vec::new(),
            allow_switch_fallthrough,
        };
        builder.entry = builder.push_block(BlockKind::Entry);
        builder.exit = builder.push_block(BlockKind::Exit);
        builder
    }

    /// Lowers `body` (the function's statement list) and returns the
    /// completed, pruned, invariant-checked CFG.
    pub fn build(mut self, body: NodeId) -> CfgResult<Cfg> {
        tracing::debug!(function = %self.function_id, "building CFG");
        let end = self.lower_block_stmts(self.entry, body)?;
        if let Some(b) = end {
            self.add_edge(b, self.exit);
        }
        let cfg = self.finish(body)?;
        cfg.check_invariants()
            .map_err(|reason| CfgBuildError::new(body, reason))?;
        Ok(cfg)
    }

    fn finish(self, body: NodeId) -> CfgResult<Cfg> {
        if self.blocks.is_empty() {
            return Err(CfgBuildError::new(body, "no blocks constructed"));
        }
        Ok(prune_unreachable(Cfg {
            function_id: self.function_id,
            entry: self.entry,
            exit: self.exit,
            blocks: self.blocks,
            instructions: self.instructions,
        }))
    }

    // ── block/instruction scratch space ────────────────────────────────

    fn push_block(&mut self, kind: BlockKind) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block::new(id, kind));
        if kind != BlockKind::Catch {
            if let Some(&catch) = self.catch_stack.last() {
                self.add_edge(id, catch);
            }
        }
        id
    }

    fn add_edge(&mut self, from: BlockId, to: BlockId) {
        self.blocks[from.index()].successors.insert(to);
        self.blocks[to.index()].predecessors.insert(from);
    }

    fn push_instruction(
        &mut self,
        block: BlockId,
        node: NodeId,
        op: OperationTag,
        operands: Vec<SymbolId>,
        result: Option<SymbolId>,
    ) -> InstructionId {
        let id = InstructionId(self.instructions.len() as u32);
        self.instructions.push(Instruction {
            id,
            node,
            op,
            operands,
            result,
        });
        self.blocks[block.index()].instructions.push(id);
        id
    }

    fn resolve_symbol(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.symbols_by_name.get(name) {
            return id;
        }
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols
            .push(Symbol::new(id, name, ScopeId(0), TypeTag::Unknown));
        self.symbols_by_name.insert(name.to_string(), id);
        id
    }

    fn fresh_temp(&mut self) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        let name = format!("%t{}", self.next_temp);
        self.next_temp += 1;
        self.symbols
            .push(Symbol::new(id, name, ScopeId(0), TypeTag::Unknown));
        id
    }

    // ── statement lowering ──────────────────────────────────────────────

    /// Lowers a statement list, stopping at the first terminating
    /// statement (return/throw/break/continue): later siblings are
    /// unreachable and are not lowered.
    fn lower_block_stmts(&mut self, current: BlockId, container: NodeId) -> CfgResult<Option<BlockId>> {
        let mut cur = Some(current);
        for stmt in self.ast.children(container) {
            let Some(c) = cur else { break };
            cur = self.lower_stmt(c, stmt)?;
        }
        Ok(cur)
    }

    fn lower_stmt(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        match self.ast.kind(node) {
            NodeKind::Block => self.lower_block_stmts(current, node),
            NodeKind::IfStmt => self.lower_if(current, node),
            NodeKind::WhileStmt => self.lower_while(current, node),
            NodeKind::ForStmt => self.lower_for(current, node),
            NodeKind::SwitchStmt => self.lower_switch(current, node),
            NodeKind::ReturnStmt => self.lower_return(current, node),
            NodeKind::ThrowStmt => self.lower_throw(current, node),
            NodeKind::BreakStmt => self.lower_break(current, node),
            NodeKind::ContinueStmt => self.lower_continue(current, node),
            NodeKind::TryStmt => self.lower_try(current, node),
            _ => self.lower_simple_stmt(current, node).map(Some),
        }
    }

    fn lower_if(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let children = self.ast.children(node);
        if children.len() < 2 {
            return Err(CfgBuildError::new(node, "if statement missing condition or then-branch"));
        }
        let (cond, then_node) = (children[0], children[1]);
        let else_node = children.get(2).copied();

        self.emit_branch(current, cond);

        let then_block = self.push_block(BlockKind::Normal);
        self.add_edge(current, then_block);
        let then_end = self.lower_block_stmts(then_block, then_node)?;

        let else_end = if let Some(else_node) = else_node {
            let else_block = self.push_block(BlockKind::Normal);
            self.add_edge(current, else_block);
            self.lower_block_stmts(else_block, else_node)?
        } else {
            Some(current)
        };

        let mut preds = Vec::new();
        preds.extend(then_end);
        preds.extend(else_end);
        if preds.is_empty() {
            return Ok(None);
        }
        let join = self.push_block(BlockKind::Normal);
        for p in preds {
            self.add_edge(p, join);
        }
        Ok(Some(join))
    }

    fn lower_while(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let children = self.ast.children(node);
        if children.len() != 2 {
            return Err(CfgBuildError::new(node, "while statement expects [cond, body]"));
        }
        self.lower_loop(current, children[0], None, children[1])
    }

    fn lower_for(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let children = self.ast.children(node);
        if children.len() != 4 {
            return Err(CfgBuildError::new(node, "for statement expects [init, cond, update, body]"));
        }
        let (init, cond, update, body) = (children[0], children[1], children[2], children[3]);
        let current = self.lower_simple_stmt(current, init)?;
        self.lower_loop(current, cond, Some(update), body)
    }

    fn lower_loop(
        &mut self,
        current: BlockId,
        cond: NodeId,
        update: Option<NodeId>,
        body_node: NodeId,
    ) -> CfgResult<Option<BlockId>> {
        let header = self.push_block(BlockKind::LoopHeader);
        self.add_edge(current, header);
        let exit_block = self.push_block(BlockKind::Normal);

        self.emit_branch(header, cond);
        let body_block = self.push_block(BlockKind::Normal);
        self.add_edge(header, body_block);
        self.add_edge(header, exit_block);

        self.loop_stack.push(LoopCtx {
            header,
            exit: exit_block,
        });
        let body_end = self.lower_block_stmts(body_block, body_node)?;
        self.loop_stack.pop();

        let body_end = match (body_end, update) {
            (Some(b), Some(update)) => Some(self.lower_simple_stmt(b, update)?),
            (end, _) => end,
        };
        if let Some(b) = body_end {
            // back-edge: `header` dominates every block in the loop body
            // by construction, satisfying the CFG's back-edge invariant.
            self.add_edge(b, header);
        }
        Ok(Some(exit_block))
    }

    fn lower_switch(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let children = self.ast.children(node);
        if children.is_empty() {
            return Err(CfgBuildError::new(node, "switch statement missing subject"));
        }
        self.lower_expr(current, children[0]);
        let case_nodes = &children[1..];
        let n = case_nodes.len();

        let case_blocks: Vec<BlockId> = (0..n).map(|_| self.push_block(BlockKind::Normal)).collect();
        for &cb in &case_blocks {
            self.add_edge(current, cb);
        }

        let mut has_default = false;
        let mut join_preds = Vec::new();
        for i in 0..n {
            let case_node = case_nodes[i];
            has_default |= self.ast.lexeme(case_node) == Some("default");
            let end = self.lower_block_stmts(case_blocks[i], case_node)?;
            match end {
                Some(b) if self.allow_switch_fallthrough && i + 1 < n => {
                    self.add_edge(b, case_blocks[i + 1]);
                }
                Some(b) => join_preds.push(b),
                None => {}
            }
        }
        if !has_default {
            join_preds.push(current);
        }
        if join_preds.is_empty() {
            return Ok(None);
        }
        let join = self.push_block(BlockKind::Normal);
        for p in join_preds {
            self.add_edge(p, join);
        }
        Ok(Some(join))
    }

    fn lower_try(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let children = self.ast.children(node);
        if children.is_empty() {
            return Err(CfgBuildError::new(node, "try statement missing body"));
        }
        let try_body = children[0];
        let mut catch_nodes = Vec::new();
        let mut finally_node = None;
        for &child in &children[1..] {
            match self.ast.kind(child) {
                NodeKind::CatchClause => catch_nodes.push(child),
                NodeKind::FinallyClause => finally_node = Some(child),
                _ => {}
            }
        }

        let catch_entry = if catch_nodes.is_empty() {
            None
        } else {
            Some(self.push_block(BlockKind::Catch))
        };

        let finally_chain = if let Some(fnode) = finally_node {
            let f_entry = self.push_block(BlockKind::Normal);
            let f_end = self.lower_block_stmts(f_entry, fnode)?;
            Some((f_entry, f_end))
        } else {
            None
        };
        if let Some(chain) = finally_chain {
            self.finally_stack.push(chain);
        }
        if let Some(catch_entry) = catch_entry {
            self.catch_stack.push(catch_entry);
        }

        let try_block = self.push_block(BlockKind::Normal);
        self.add_edge(current, try_block);
        let try_end = self.lower_block_stmts(try_block, try_body)?;

        if catch_entry.is_some() {
            self.catch_stack.pop();
        }
        let catch_end = match catch_entry {
            Some(entry) => self.lower_block_stmts(entry, catch_nodes[0])?,
            None => None,
        };
        if finally_chain.is_some() {
            self.finally_stack.pop();
        }

        let mut ends = BTreeSet::new();
        for end in [try_end, catch_end].into_iter().flatten() {
            match finally_chain {
                Some((f_entry, f_end)) => {
                    self.add_edge(end, f_entry);
                    if let Some(f_end) = f_end {
                        ends.insert(f_end);
                    }
                }
                None => {
                    ends.insert(end);
                }
            }
        }
        if ends.is_empty() {
            return Ok(None);
        }
        let join = self.push_block(BlockKind::Normal);
        for e in ends {
            self.add_edge(e, join);
        }
        Ok(Some(join))
    }

    fn lower_return(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let operands = self
            .ast
            .children(node)
            .first()
            .map(|&e| vec![self.lower_expr(current, e)])
            .unwrap_or_default();
        self.push_instruction(current, node, OperationTag::Return, operands, None);
        self.route_through_finally(current, self.exit);
        Ok(None)
    }

    fn lower_throw(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        if let Some(&expr) = self.ast.children(node).first() {
            self.lower_expr(current, expr);
        }
        let target = self.catch_stack.last().copied().unwrap_or(self.exit);
        self.route_through_finally(current, target);
        Ok(None)
    }

    fn lower_break(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let Some(ctx_exit) = self.loop_stack.last().map(|c| c.exit) else {
            return Err(CfgBuildError::new(node, "break outside of a loop"));
        };
        self.route_through_finally(current, ctx_exit);
        Ok(None)
    }

    fn lower_continue(&mut self, current: BlockId, node: NodeId) -> CfgResult<Option<BlockId>> {
        let Some(ctx_header) = self.loop_stack.last().map(|c| c.header) else {
            return Err(CfgBuildError::new(node, "continue outside of a loop"));
        };
        self.route_through_finally(current, ctx_header);
        Ok(None)
    }

    /// Routes control to `target`, passing through the nearest active
    /// `finally` block first, if any.
    fn route_through_finally(&mut self, from: BlockId, target: BlockId) {
        match self.finally_stack.last().copied() {
            Some((entry, _)) => self.add_edge(from, entry),
            None => self.add_edge(from, target),
        }
    }

    fn lower_simple_stmt(&mut self, block: BlockId, node: NodeId) -> CfgResult<BlockId> {
        match self.ast.kind(node) {
            NodeKind::VarDecl => {
                let children = self.ast.children(node);
                let name = children
                    .first()
                    .and_then(|&n| self.ast.lexeme(n))
                    .unwrap_or("")
                    .to_string();
                let dst = self.resolve_symbol(&name);
                if let Some(&rhs) = children.get(1) {
                    let src = self.lower_expr(block, rhs);
                    self.push_instruction(block, node, OperationTag::Assign, vec![src], Some(dst));
                }
            }
            NodeKind::Assignment => {
                let children = self.ast.children(node);
                if children.len() < 2 {
                    return Err(CfgBuildError::new(node, "assignment missing lhs or rhs"));
                }
                let (lhs, rhs) = (children[0], children[1]);
                let src = self.lower_expr(block, rhs);
                match self.ast.kind(lhs) {
                    NodeKind::FieldAccess => {
                        let base = self
                            .ast
                            .children(lhs)
                            .first()
                            .map(|&c| self.lower_expr(block, c))
                            .unwrap_or_else(|| self.fresh_temp());
                        self.push_instruction(block, node, OperationTag::Store, vec![base, src], None);
                    }
                    NodeKind::IndexAccess => {
                        let idx_children = self.ast.children(lhs);
                        let base = idx_children
                            .first()
                            .map(|&c| self.lower_expr(block, c))
                            .unwrap_or_else(|| self.fresh_temp());
                        let index = idx_children
                            .get(1)
                            .map(|&c| self.lower_expr(block, c))
                            .unwrap_or_else(|| self.fresh_temp());
                        self.push_instruction(
                            block,
                            node,
                            OperationTag::IndexStore,
                            vec![base, index, src],
                            None,
                        );
                    }
                    _ => {
                        let name = self.ast.lexeme(lhs).unwrap_or("").to_string();
                        let dst = self.resolve_symbol(&name);
                        self.push_instruction(block, node, OperationTag::Assign, vec![src], Some(dst));
                    }
                }
            }
            NodeKind::ExpressionStmt => {
                if let Some(&expr) = self.ast.children(node).first() {
                    self.lower_expr(block, expr);
                }
            }
            _ => {
                self.lower_expr(block, node);
            }
        }
        Ok(block)
    }

    fn emit_branch(&mut self, block: BlockId, cond: NodeId) {
        let sym = self.lower_expr(block, cond);
        self.push_instruction(block, cond, OperationTag::Branch, vec![sym], None);
    }

    /// Lowers an expression for its value, emitting instructions as it
    /// discovers operations, returning the symbol holding the result.
    fn lower_expr(&mut self, block: BlockId, node: NodeId) -> SymbolId {
        match self.ast.kind(node) {
            NodeKind::Identifier => {
                let name = self.ast.lexeme(node).unwrap_or("").to_string();
                self.resolve_symbol(&name)
            }
            NodeKind::Literal | NodeKind::NullLiteral => self.fresh_temp(),
            NodeKind::BinaryExpr | NodeKind::LogicalAnd | NodeKind::LogicalOr => {
                let children = self.ast.children(node);
                let l = children
                    .first()
                    .map(|&c| self.lower_expr(block, c))
                    .unwrap_or_else(|| self.fresh_temp());
                let r = children
                    .get(1)
                    .map(|&c| self.lower_expr(block, c))
                    .unwrap_or_else(|| self.fresh_temp());
                let op = binop_kind(self.ast.lexeme(node));
                let result = self.fresh_temp();
                self.push_instruction(block, node, OperationTag::BinOp(op), vec![l, r], Some(result));
                result
            }
            NodeKind::CallExpr => {
                let operands: Vec<SymbolId> = self
                    .ast
                    .children(node)
                    .into_iter()
                    .map(|c| self.lower_expr(block, c))
                    .collect();
                let result = self.fresh_temp();
                self.push_instruction(block, node, OperationTag::Call, operands, Some(result));
                result
            }
            NodeKind::NewExpr => {
                let result = self.fresh_temp();
                self.push_instruction(block, node, OperationTag::Alloc, vec![], Some(result));
                result
            }
            NodeKind::FieldAccess => {
                let base = self
                    .ast
                    .children(node)
                    .first()
                    .map(|&c| self.lower_expr(block, c))
                    .unwrap_or_else(|| self.fresh_temp());
                let result = self.fresh_temp();
                self.push_instruction(block, node, OperationTag::Load, vec![base], Some(result));
                result
            }
            NodeKind::IndexAccess => {
                let children = self.ast.children(node);
                let base = children
                    .first()
                    .map(|&c| self.lower_expr(block, c))
                    .unwrap_or_else(|| self.fresh_temp());
                let index = children
                    .get(1)
                    .map(|&c| self.lower_expr(block, c))
                    .unwrap_or_else(|| self.fresh_temp());
                let result = self.fresh_temp();
                self.push_instruction(
                    block,
                    node,
                    OperationTag::IndexLoad,
                    vec![base, index],
                    Some(result),
                );
                result
            }
            NodeKind::NullCheck => {
                let inner = self
                    .ast
                    .children(node)
                    .first()
                    .map(|&c| self.lower_expr(block, c))
                    .unwrap_or_else(|| self.fresh_temp());
                let result = self.fresh_temp();
                self.push_instruction(block, node, OperationTag::NullCheck, vec![inner], Some(result));
                result
            }
            NodeKind::CastExpr | NodeKind::TernaryExpr | NodeKind::UnaryExpr => self
                .ast
                .children(node)
                .first()
                .map(|&c| self.lower_expr(block, c))
                .unwrap_or_else(|| self.fresh_temp()),
            _ => self.fresh_temp(),
        }
    }
}

fn binop_kind(lexeme: Option<&str>) -> crate::features::cfg::domain::BinOpKind {
    use crate::features::cfg::domain::BinOpKind::*;
    match lexeme {
        Some("+") => Add,
        Some("-") => Sub,
        Some("*") => Mul,
        Some("/") => Div,
        Some("%") => Mod,
        Some("==") => Eq,
        Some("!=") => Ne,
        Some("<") => Lt,
        Some("<=") => Le,
        Some(">") => Gt,
        Some(">=") => Ge,
        Some("&&") => And,
        Some("||") => Or,
        _ => Other,
    }
}

/// Removes blocks unreachable from entry and renumbers the rest densely,
/// so the invariants in spec §3/§8 hold even when source constructs like
/// an unconditional loop with no `break` leave a block with no
/// predecessors (spec §4.2's "unreachable blocks are elided first" applies
/// here too, not only ahead of phi placement).
fn prune_unreachable(cfg: Cfg) -> Cfg {
    let mut reachable = vec![false; cfg.blocks.len()];
    let mut stack = vec![cfg.entry];
    reachable[cfg.entry.index()] = true;
    while let Some(b) = stack.pop() {
        for &s in &cfg.blocks[b.index()].successors {
            if !reachable[s.index()] {
                reachable[s.index()] = true;
                stack.push(s);
            }
        }
    }

    let mut remap: HashMap<BlockId, BlockId> = HashMap::new();
    let mut kept_old_ids = Vec::new();
    for (old_idx, keep) in reachable.iter().enumerate() {
        if *keep {
            let new_id = BlockId(kept_old_ids.len() as u32);
            remap.insert(BlockId(old_idx as u32), new_id);
            kept_old_ids.push(old_idx);
        }
    }

    let blocks = kept_old_ids
        .into_iter()
        .map(|old_idx| {
            let mut block = cfg.blocks[old_idx].clone();
            block.id = remap[&block.id];
            block.predecessors = block.predecessors.iter().filter_map(|p| remap.get(p).copied()).collect();
            block.successors = block.successors.iter().filter_map(|s| remap.get(s).copied()).collect();
            block
        })
        .collect();

    Cfg {
        function_id: cfg.function_id,
        entry: remap[&cfg.entry],
        exit: remap[&cfg.exit],
        blocks,
        instructions: cfg.instructions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Span;
    use std::cell::RefCell;

    /// Minimal in-memory AST for unit tests: a flat arena of nodes with
    /// explicit kind/children/lexeme, built by hand per test.
    struct FakeAst {
        kinds: Vec<NodeKind>,
        children: Vec<Vec<NodeId>>,
        lexemes: Vec<Option<&'static str>>,
        text: RefCell<String>,
    }

    impl FakeAst {
        fn new() -> Self {
            Self {
                kinds: Vec::new(),
                children: Vec::new(),
                lexemes: Vec::new(),
                text: RefCell::new(String::new()),
            }
        }

        fn node(&mut self, kind: NodeKind, children: Vec<NodeId>, lexeme: Option<&'static str>) -> NodeId {
            let id = self.kinds.len() as NodeId;
            self.kinds.push(kind);
            self.children.push(children);
            self.lexemes.push(lexeme);
            id
        }
    }

    impl AstVisitor for FakeAst {
        fn kind(&self, node: NodeId) -> NodeKind {
            self.kinds[node as usize]
        }
        fn children(&self, node: NodeId) -> Vec<NodeId> {
            self.children[node as usize].clone()
        }
        fn range(&self, _node: NodeId) -> Span {
            Span::zero()
        }
        fn lexeme(&self, node: NodeId) -> Option<&str> {
            self.lexemes[node as usize]
        }
        fn source_text(&self, _range: Span) -> &str {
            // SAFETY-free: tests never inspect this value's lifetime games.
            Box::leak(self.text.borrow().clone().into_boxed_str())
        }
    }

    fn ident(ast: &mut FakeAst, name: &'static str) -> NodeId {
        ast.node(NodeKind::Identifier, vec![], Some(name))
    }

    fn lit(ast: &mut FakeAst) -> NodeId {
        ast.node(NodeKind::Literal, vec![], None)
    }

    #[test]
    fn straight_line_body_has_single_entry_exit_edge() {
        let mut ast = FakeAst::new();
        let rhs = lit(&mut ast);
        let decl = ast.node(NodeKind::VarDecl, vec![ident(&mut ast, "x"), rhs], None);
        let body = ast.node(NodeKind::Block, vec![decl], None);

        let cfg = CfgBuilder::new(&ast, "f").build(body).unwrap();
        assert_eq!(cfg.blocks.len(), 2);
        assert!(cfg.block(cfg.entry).successors.contains(&cfg.exit));
        cfg.check_invariants().unwrap();
    }

    #[test]
    fn if_else_creates_diamond_with_join() {
        let mut ast = FakeAst::new();
        let cond = ident(&mut ast, "c");
        let then_stmt = ast.node(NodeKind::ExpressionStmt, vec![ident(&mut ast, "a")], None);
        let then_block = ast.node(NodeKind::Block, vec![then_stmt], None);
        let else_stmt = ast.node(NodeKind::ExpressionStmt, vec![ident(&mut ast, "b")], None);
        let else_block = ast.node(NodeKind::Block, vec![else_stmt], None);
        let if_node = ast.node(NodeKind::IfStmt, vec![cond, then_block, else_block], None);
        let body = ast.node(NodeKind::Block, vec![if_node], None);

        let cfg = CfgBuilder::new(&ast, "f").build(body).unwrap();
        cfg.check_invariants().unwrap();
        // entry, then, else, join, exit
        assert_eq!(cfg.blocks.len(), 5);
    }

    #[test]
    fn if_without_else_falls_through_to_join() {
        let mut ast = FakeAst::new();
        let cond = ident(&mut ast, "c");
        let then_stmt = ast.node(NodeKind::ExpressionStmt, vec![ident(&mut ast, "a")], None);
        let then_block = ast.node(NodeKind::Block, vec![then_stmt], None);
        let if_node = ast.node(NodeKind::IfStmt, vec![cond, then_block], None);
        let body = ast.node(NodeKind::Block, vec![if_node], None);

        let cfg = CfgBuilder::new(&ast, "f").build(body).unwrap();
        cfg.check_invariants().unwrap();
        assert_eq!(cfg.blocks.len(), 4); // entry, then, join, exit
    }

    #[test]
    fn while_loop_has_back_edge_into_header() {
        let mut ast = FakeAst::new();
        let cond = ident(&mut ast, "c");
        let body_stmt = ast.node(NodeKind::ExpressionStmt, vec![ident(&mut ast, "a")], None);
        let loop_body = ast.node(NodeKind::Block, vec![body_stmt], None);
        let while_node = ast.node(NodeKind::WhileStmt, vec![cond, loop_body], None);
        let fn_body = ast.node(NodeKind::Block, vec![while_node], None);

        let cfg = CfgBuilder::new(&ast, "f").build(fn_body).unwrap();
        cfg.check_invariants().unwrap();

        let header = cfg
            .blocks
            .iter()
            .find(|b| b.kind == BlockKind::LoopHeader)
            .unwrap();
        // the body block must have a back-edge into the header.
        assert!(header.predecessors.len() >= 2);
    }

    #[test]
    fn break_jumps_to_loop_exit_and_prunes_dead_fallthrough() {
        let mut ast = FakeAst::new();
        let cond = ident(&mut ast, "c");
        let brk = ast.node(NodeKind::BreakStmt, vec![], None);
        let loop_body = ast.node(NodeKind::Block, vec![brk], None);
        let while_node = ast.node(NodeKind::WhileStmt, vec![cond, loop_body], None);
        let fn_body = ast.node(NodeKind::Block, vec![while_node], None);

        let cfg = CfgBuilder::new(&ast, "f").build(fn_body).unwrap();
        cfg.check_invariants().unwrap();
    }

    #[test]
    fn switch_without_default_falls_through_to_join() {
        let mut ast = FakeAst::new();
        let subject = ident(&mut ast, "s");
        let case_stmt = ast.node(NodeKind::ExpressionStmt, vec![ident(&mut ast, "a")], None);
        let case1 = ast.node(NodeKind::CaseArm, vec![case_stmt], Some("case1"));
        let switch_node = ast.node(NodeKind::SwitchStmt, vec![subject, case1], None);
        let fn_body = ast.node(NodeKind::Block, vec![switch_node], None);

        let cfg = CfgBuilder::new(&ast, "f").build(fn_body).unwrap();
        cfg.check_invariants().unwrap();
    }

    #[test]
    fn try_finally_routes_return_through_finally() {
        let mut ast = FakeAst::new();
        let ret = ast.node(NodeKind::ReturnStmt, vec![lit(&mut ast)], None);
        let try_body = ast.node(NodeKind::Block, vec![ret], None);
        let finally_stmt = ast.node(NodeKind::ExpressionStmt, vec![ident(&mut ast, "cleanup")], None);
        let finally_clause = ast.node(NodeKind::FinallyClause, vec![finally_stmt], None);
        let try_node = ast.node(NodeKind::TryStmt, vec![try_body, finally_clause], None);
        let fn_body = ast.node(NodeKind::Block, vec![try_node], None);

        let cfg = CfgBuilder::new(&ast, "f").build(fn_body).unwrap();
        cfg.check_invariants().unwrap();
        // the finally body's block must be on the path to exit.
        let finally_block = cfg
            .blocks
            .iter()
            .find(|b| {
                b.instructions
                    .iter()
                    .any(|&i| matches!(cfg.instruction(i).op, OperationTag::BinOp(_)) == false)
                    && !b.instructions.is_empty()
                    && b.id != cfg.entry
            })
            .unwrap();
        assert!(!finally_block.successors.is_empty());
    }
}
