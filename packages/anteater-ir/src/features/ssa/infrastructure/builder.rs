/*
 * Dominator computation, dominance frontiers, phi placement and renaming
 * (spec §4.2).
 *
 * Dominators are computed with the classic Cooper/Harvey/Kennedy iterative
 * algorithm over reverse postorder; dominance frontiers with the standard
 * union rule; phi placement is minimal/pruned (iterated dominance frontier
 * filtered by liveness); renaming is a dominator-tree depth-first walk with
 * a per-symbol version stack.
 *
 * Every symbol is given an implicit version 0 at function entry, standing
 * in for "parameter or otherwise not locally defined" - this sidesteps a
 * spurious `UndefinedUse` on every parameter read without requiring the
 * CFG builder to synthesize explicit parameter-binding instructions.
 */

use super::errors::{SsaError, SsaResult};
use crate::features::cfg::domain::Cfg;
use crate::features::ssa::domain::{Phi, SsaBlock, SsaGraph, SsaInstruction, Version, VersionedSymbol};
use crate::shared::models::{BlockId, SymbolId};
use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use std::collections::VecDeque;

pub struct SsaBuilder<'a> {
    cfg: &'a Cfg,
}

impl<'a> SsaBuilder<'a> {
    pub fn new(cfg: &'a Cfg) -> Self {
        Self { cfg }
    }

    pub fn build(self) -> SsaResult<SsaGraph> {
        if self.cfg.blocks.is_empty() {
            return Err(SsaError::EmptyCfg {
                function_id: self.cfg.function_id.clone(),
            });
        }
        tracing::debug!(function = %self.cfg.function_id, "building SSA");

        let rpo = self.cfg.reverse_postorder();
        let idom = compute_idom(self.cfg, &rpo);
        let dominance_frontier = compute_dominance_frontier(self.cfg, &idom, &rpo);
        let (live_in, def_sites) = self.analyze_defs_and_liveness();

        let mut blocks: HashMap<BlockId, SsaBlock> =
            self.cfg.blocks.iter().map(|b| (b.id, SsaBlock::default())).collect();

        place_phis(self.cfg, &dominance_frontier, &live_in, &def_sites, &mut blocks);

        rename(self.cfg, &idom, &mut blocks)?;

        Ok(SsaGraph {
            function_id: self.cfg.function_id.clone(),
            blocks,
            idom,
            dominance_frontier,
        })
    }

    /// Computes, per block: the set of symbols live on entry and the set
    /// of blocks that define each symbol (both needed by phi placement).
    fn analyze_defs_and_liveness(
        &self,
    ) -> (
        HashMap<BlockId, HashSet<SymbolId>>,
        HashMap<SymbolId, Vec<BlockId>>,
    ) {
        let mut use_: HashMap<BlockId, HashSet<SymbolId>> = HashMap::new();
        let mut def_: HashMap<BlockId, HashSet<SymbolId>> = HashMap::new();
        let mut def_sites: HashMap<SymbolId, Vec<BlockId>> = HashMap::new();

        for block in &self.cfg.blocks {
            let mut local_use = HashSet::new();
            let mut local_def: HashSet<SymbolId> = HashSet::new();
            for &iid in &block.instructions {
                let instr = self.cfg.instruction(iid);
                for &op in &instr.operands {
                    if !local_def.contains(&op) {
                        local_use.insert(op);
                    }
                }
                if let Some(result) = instr.result {
                    local_def.insert(result);
                    def_sites.entry(result).or_default().push(block.id);
                }
            }
            use_.insert(block.id, local_use);
            def_.insert(block.id, local_def);
        }

        let mut live_in: HashMap<BlockId, HashSet<SymbolId>> =
            self.cfg.blocks.iter().map(|b| (b.id, HashSet::new())).collect();
        let mut live_out: HashMap<BlockId, HashSet<SymbolId>> =
            self.cfg.blocks.iter().map(|b| (b.id, HashSet::new())).collect();

        let postorder = self.cfg.postorder();
        let mut changed = true;
        while changed {
            changed = false;
            for &b in &postorder {
                let block = self.cfg.block(b);
                let mut out = HashSet::new();
                for &s in &block.successors {
                    out.extend(live_in[&s].iter().copied());
                }
                let mut inn = use_[&b].clone();
                for sym in out.difference(&def_[&b]) {
                    inn.insert(*sym);
                }
                if inn != live_in[&b] {
                    live_in.insert(b, inn);
                    changed = true;
                }
                if out != live_out[&b] {
                    live_out.insert(b, out);
                    changed = true;
                }
            }
        }

        (live_in, def_sites)
    }
}

/// Iterative dominator computation (Cooper, Harvey & Kennedy, 2001).
fn compute_idom(cfg: &Cfg, rpo: &[BlockId]) -> HashMap<BlockId, BlockId> {
    let rpo_number: HashMap<BlockId, usize> =
        rpo.iter().enumerate().map(|(i, &b)| (b, i)).collect();

    let mut idom: HashMap<BlockId, BlockId> = HashMap::new();
    idom.insert(cfg.entry, cfg.entry);

    let mut changed = true;
    while changed {
        changed = false;
        for &b in rpo {
            if b == cfg.entry {
                continue;
            }
            let mut new_idom = None;
            for &p in &cfg.block(b).predecessors {
                if !idom.contains_key(&p) {
                    continue;
                }
                new_idom = Some(match new_idom {
                    None => p,
                    Some(cur) => intersect(cur, p, &idom, &rpo_number),
                });
            }
            if let Some(new_idom) = new_idom {
                if idom.get(&b) != Some(&new_idom) {
                    idom.insert(b, new_idom);
                    changed = true;
                }
            }
        }
    }
    idom
}

fn intersect(
    mut a: BlockId,
    mut b: BlockId,
    idom: &HashMap<BlockId, BlockId>,
    rpo_number: &HashMap<BlockId, usize>,
) -> BlockId {
    while a != b {
        while rpo_number[&a] > rpo_number[&b] {
            a = idom[&a];
        }
        while rpo_number[&b] > rpo_number[&a] {
            b = idom[&b];
        }
    }
    a
}

fn compute_dominance_frontier(
    cfg: &Cfg,
    idom: &HashMap<BlockId, BlockId>,
    rpo: &[BlockId],
) -> HashMap<BlockId, Vec<BlockId>> {
    let mut df: HashMap<BlockId, HashSet<BlockId>> =
        rpo.iter().map(|&b| (b, HashSet::new())).collect();

    for &b in rpo {
        let preds = &cfg.block(b).predecessors;
        if preds.len() < 2 {
            continue;
        }
        for &p in preds {
            if !idom.contains_key(&p) {
                continue;
            }
            let mut runner = p;
            while runner != idom[&b] {
                df.get_mut(&runner).unwrap().insert(b);
                if runner == idom[&runner] {
                    break;
                }
                runner = idom[&runner];
            }
        }
    }

    df.into_iter()
        .map(|(b, set)| {
            let mut v: Vec<BlockId> = set.into_iter().collect();
            v.sort();
            (b, v)
        })
        .collect()
}

fn place_phis(
    cfg: &Cfg,
    dominance_frontier: &HashMap<BlockId, Vec<BlockId>>,
    live_in: &HashMap<BlockId, HashSet<SymbolId>>,
    def_sites: &HashMap<SymbolId, Vec<BlockId>>,
    blocks: &mut HashMap<BlockId, SsaBlock>,
) {
    for (&symbol, sites) in def_sites {
        let mut worklist: VecDeque<BlockId> = sites.iter().copied().collect();
        let mut queued: HashSet<BlockId> = sites.iter().copied().collect();
        let mut has_phi: HashSet<BlockId> = HashSet::new();

        while let Some(b) = worklist.pop_front() {
            for &d in dominance_frontier.get(&b).map(Vec::as_slice).unwrap_or(&[]) {
                if has_phi.contains(&d) {
                    continue;
                }
                if !live_in.get(&d).map(|s| s.contains(&symbol)).unwrap_or(false) {
                    continue;
                }
                has_phi.insert(d);
                let operands = cfg
                    .block(d)
                    .predecessors
                    .iter()
                    .map(|&p| (p, VersionedSymbol::new(symbol, Version(0))))
                    .collect();
                blocks.get_mut(&d).unwrap().phis.push(Phi {
                    symbol,
                    result: VersionedSymbol::new(symbol, Version(0)),
                    operands,
                });
                if !queued.contains(&d) {
                    queued.insert(d);
                    worklist.push_back(d);
                }
            }
        }
    }

    for block in blocks.values_mut() {
        block.phis.sort_by_key(|p| p.symbol);
    }
}

fn dominator_children(idom: &HashMap<BlockId, BlockId>, entry: BlockId) -> HashMap<BlockId, Vec<BlockId>> {
    let mut children: HashMap<BlockId, Vec<BlockId>> = HashMap::new();
    for (&b, &d) in idom {
        if b != entry {
            children.entry(d).or_default().push(b);
        }
    }
    for v in children.values_mut() {
        v.sort();
    }
    children
}

fn rename(
    cfg: &Cfg,
    idom: &HashMap<BlockId, BlockId>,
    blocks: &mut HashMap<BlockId, SsaBlock>,
) -> SsaResult<()> {
    let children = dominator_children(idom, cfg.entry);
    let mut next_version: HashMap<SymbolId, u32> = HashMap::new();
    let mut stacks: HashMap<SymbolId, Vec<Version>> = HashMap::new();

    for block in &cfg.blocks {
        for &iid in &block.instructions {
            let instr = cfg.instruction(iid);
            for &op in instr.operands.iter().chain(instr.result.iter()) {
                stacks.entry(op).or_insert_with(|| vec![Version(0)]);
            }
        }
        for phi in &blocks[&block.id].phis {
            stacks.entry(phi.symbol).or_insert_with(|| vec![Version(0)]);
        }
    }

    rename_block(cfg, cfg.entry, &children, &mut next_version, &mut stacks, blocks)?;

    Ok(())
}

fn fresh_version(symbol: SymbolId, next_version: &mut HashMap<SymbolId, u32>) -> Version {
    let counter = next_version.entry(symbol).or_insert(1);
    let v = Version(*counter);
    *counter += 1;
    v
}

fn rename_block(
    cfg: &Cfg,
    block_id: BlockId,
    children: &HashMap<BlockId, Vec<BlockId>>,
    next_version: &mut HashMap<SymbolId, u32>,
    stacks: &mut HashMap<SymbolId, Vec<Version>>,
    blocks: &mut HashMap<BlockId, SsaBlock>,
) -> SsaResult<()> {
    let mut defined_here: Vec<SymbolId> = Vec::new();

    let phi_symbols: Vec<SymbolId> = blocks[&block_id].phis.iter().map(|p| p.symbol).collect();
    for (i, symbol) in phi_symbols.into_iter().enumerate() {
        let version = fresh_version(symbol, next_version);
        stacks.get_mut(&symbol).unwrap().push(version);
        defined_here.push(symbol);
        blocks.get_mut(&block_id).unwrap().phis[i].result = VersionedSymbol::new(symbol, version);
    }

    let block = cfg.block(block_id);
    for &iid in &block.instructions {
        let instr = cfg.instruction(iid);
        let mut operands = Vec::with_capacity(instr.operands.len());
        for &op in &instr.operands {
            let version = *stacks
                .get(&op)
                .and_then(|s| s.last())
                .ok_or(SsaError::UndefinedUse {
                    symbol: op,
                    block: block_id,
                })?;
            operands.push(VersionedSymbol::new(op, version));
        }
        let result = instr.result.map(|sym| {
            let version = fresh_version(sym, next_version);
            stacks.get_mut(&sym).unwrap().push(version);
            defined_here.push(sym);
            VersionedSymbol::new(sym, version)
        });
        blocks.get_mut(&block_id).unwrap().instructions.push(SsaInstruction {
            instruction: iid,
            operands,
            result,
        });
    }

    let successors: Vec<BlockId> = cfg.block(block_id).successors.iter().copied().collect();
    for succ in successors {
        let preds_sorted: Vec<BlockId> = cfg.block(succ).predecessors.iter().copied().collect();
        let pred_idx = preds_sorted.iter().position(|&p| p == block_id);
        let Some(pred_idx) = pred_idx else { continue };

        let phi_count = blocks[&succ].phis.len();
        for i in 0..phi_count {
            let symbol = blocks[&succ].phis[i].symbol;
            let version = *stacks
                .get(&symbol)
                .and_then(|s| s.last())
                .ok_or(SsaError::UndefinedUse {
                    symbol,
                    block: block_id,
                })?;
            blocks.get_mut(&succ).unwrap().phis[i].operands[pred_idx] =
                (block_id, VersionedSymbol::new(symbol, version));
        }
    }

    if let Some(kids) = children.get(&block_id) {
        for &child in kids {
            rename_block(cfg, child, children, next_version, stacks, blocks)?;
        }
    }

    for symbol in defined_here {
        stacks.get_mut(&symbol).unwrap().pop();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cfg::domain::{Block, BlockKind, Instruction, OperationTag};
    use crate::shared::models::InstructionId;

    fn leaf_block(id: u32, kind: BlockKind) -> Block {
        Block::new(BlockId(id), kind)
    }

    /// entry -> b1 -> exit, with x defined in entry and used in b1: no
    /// phi needed, single version threaded through.
    #[test]
    fn straight_line_has_no_phis() {
        let x = SymbolId(0);
        let mut entry = leaf_block(0, BlockKind::Entry);
        let mut mid = leaf_block(1, BlockKind::Normal);
        let exit = leaf_block(2, BlockKind::Exit);

        let def = Instruction {
            id: InstructionId(0),
            node: 0,
            op: OperationTag::Assign,
            operands: vec![],
            result: Some(x),
        };
        let use_ = Instruction {
            id: InstructionId(1),
            node: 1,
            op: OperationTag::Assign,
            operands: vec![x],
            result: None,
        };
        entry.instructions.push(InstructionId(0));
        mid.instructions.push(InstructionId(1));

        entry.successors.insert(BlockId(1));
        mid.predecessors.insert(BlockId(0));
        mid.successors.insert(BlockId(2));
        let mut exit = exit;
        exit.predecessors.insert(BlockId(1));

        let cfg = Cfg {
            function_id: "f".into(),
            entry: BlockId(0),
            exit: BlockId(2),
            blocks: vec![entry, mid, exit],
            instructions: vec![def, use_],
        };

        let ssa = SsaBuilder::new(&cfg).build().unwrap();
        assert!(ssa.block(BlockId(1)).unwrap().phis.is_empty());
        let used = &ssa.block(BlockId(1)).unwrap().instructions[0];
        assert_eq!(used.operands[0].version.0, 1);
    }

    /// diamond entry -> {then, else} -> join, x defined on both branches:
    /// join must get exactly one phi with two operands.
    #[test]
    fn diamond_join_gets_phi_with_two_operands() {
        let x = SymbolId(0);
        let mut entry = leaf_block(0, BlockKind::Entry);
        let mut then_b = leaf_block(1, BlockKind::Normal);
        let mut else_b = leaf_block(2, BlockKind::Normal);
        let mut join = leaf_block(3, BlockKind::Normal);
        let exit = leaf_block(4, BlockKind::Exit);

        entry.successors.insert(BlockId(1));
        entry.successors.insert(BlockId(2));
        then_b.predecessors.insert(BlockId(0));
        then_b.successors.insert(BlockId(3));
        else_b.predecessors.insert(BlockId(0));
        else_b.successors.insert(BlockId(3));
        join.predecessors.insert(BlockId(1));
        join.predecessors.insert(BlockId(2));
        join.successors.insert(BlockId(4));
        let mut exit = exit;
        exit.predecessors.insert(BlockId(3));

        let def_then = Instruction {
            id: InstructionId(0),
            node: 0,
            op: OperationTag::Assign,
            operands: vec![],
            result: Some(x),
        };
        let def_else = Instruction {
            id: InstructionId(1),
            node: 1,
            op: OperationTag::Assign,
            operands: vec![],
            result: Some(x),
        };
        let use_join = Instruction {
            id: InstructionId(2),
            node: 2,
            op: OperationTag::Assign,
            operands: vec![x],
            result: None,
        };
        then_b.instructions.push(InstructionId(0));
        else_b.instructions.push(InstructionId(1));
        join.instructions.push(InstructionId(2));

        let cfg = Cfg {
            function_id: "f".into(),
            entry: BlockId(0),
            exit: BlockId(4),
            blocks: vec![entry, then_b, else_b, join, exit],
            instructions: vec![def_then, def_else, use_join],
        };

        let ssa = SsaBuilder::new(&cfg).build().unwrap();
        let join_ssa = ssa.block(BlockId(3)).unwrap();
        assert_eq!(join_ssa.phis.len(), 1);
        assert_eq!(join_ssa.phis[0].operands.len(), 2);
        assert_eq!(join_ssa.instructions[0].operands[0].symbol, x);
    }
}
