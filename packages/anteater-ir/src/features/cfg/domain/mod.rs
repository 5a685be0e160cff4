//! CFG domain model (spec §3).

use crate::shared::ast::NodeId;
use crate::shared::models::{BlockId, InstructionId, SymbolId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Block classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Entry,
    Exit,
    Normal,
    LoopHeader,
    Catch,
}

/// Operation tag for a single instruction (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationTag {
    Assign,
    BinOp(BinOpKind),
    Call,
    Load,
    Store,
    Branch,
    Return,
    Phi,
    Alloc,
    NullCheck,
    IndexLoad,
    IndexStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Other,
}

/// A single CFG instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub id: InstructionId,
    pub node: NodeId,
    pub op: OperationTag,
    pub operands: Vec<SymbolId>,
    pub result: Option<SymbolId>,
}

/// A basic block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub instructions: Vec<InstructionId>,
    pub predecessors: BTreeSet<BlockId>,
    pub successors: BTreeSet<BlockId>,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            instructions: Vec::new(),
            predecessors: BTreeSet::new(),
            successors: BTreeSet::new(),
            kind,
        }
    }
}

/// A function's Control-Flow Graph.
///
/// Invariants (spec §3, checked by `Cfg::check_invariants`):
/// - exactly one entry block (no predecessors) and one exit block (no
///   successors);
/// - every non-exit block has >= 1 successor, every non-entry block has
///   >= 1 predecessor;
/// - block ids are dense integers;
/// - back-edges are permitted only when the target dominates the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cfg {
    pub function_id: String,
    pub entry: BlockId,
    pub exit: BlockId,
    pub blocks: Vec<Block>,
    pub instructions: Vec<Instruction>,
}

impl Cfg {
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    pub fn instruction(&self, id: InstructionId) -> &Instruction {
        &self.instructions[id.index()]
    }

    /// Blocks in a depth-first postorder starting from entry. Used
    /// throughout the pipeline whenever a deterministic block order is
    /// required (spec §4.3, §5).
    pub fn postorder(&self) -> Vec<BlockId> {
        let mut visited = vec![false; self.blocks.len()];
        let mut order = Vec::with_capacity(self.blocks.len());
        self.postorder_visit(self.entry, &mut visited, &mut order);
        order
    }

    fn postorder_visit(&self, id: BlockId, visited: &mut [bool], order: &mut Vec<BlockId>) {
        if visited[id.index()] {
            return;
        }
        visited[id.index()] = true;
        let mut succs: Vec<BlockId> = self.block(id).successors.iter().copied().collect();
        succs.sort();
        for succ in succs {
            self.postorder_visit(succ, visited, order);
        }
        order.push(id);
    }

    /// Reverse postorder - the iteration order the dominator algorithm
    /// converges fastest in (spec §4.2).
    pub fn reverse_postorder(&self) -> Vec<BlockId> {
        let mut order = self.postorder();
        order.reverse();
        order
    }

    /// Checks the structural invariants from spec §3/§8. Returns the first
    /// violation found, if any.
    pub fn check_invariants(&self) -> Result<(), String> {
        let entries: Vec<_> = self
            .blocks
            .iter()
            .filter(|b| b.predecessors.is_empty())
            .collect();
        if entries.len() != 1 || entries[0].id != self.entry {
            return Err(format!(
                "expected exactly one entry block with no predecessors, found {}",
                entries.len()
            ));
        }

        let exits: Vec<_> = self
            .blocks
            .iter()
            .filter(|b| b.successors.is_empty())
            .collect();
        if exits.len() != 1 || exits[0].id != self.exit {
            return Err(format!(
                "expected exactly one exit block with no successors, found {}",
                exits.len()
            ));
        }

        for block in &self.blocks {
            if block.id != self.exit && block.successors.is_empty() {
                return Err(format!("non-exit block {} has no successors", block.id));
            }
            if block.id != self.entry && block.predecessors.is_empty() {
                return Err(format!("non-entry block {} has no predecessors", block.id));
            }
        }

        let reachable: BTreeSet<BlockId> = self.postorder().into_iter().collect();
        for block in &self.blocks {
            if !reachable.contains(&block.id) {
                return Err(format!("block {} is not reachable from entry", block.id));
            }
        }

        Ok(())
    }
}
