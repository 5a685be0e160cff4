//! Worklist abstract interpreter over the CFG (spec §4.6).
//!
//! Runs per function, independent of SSA form: null/interval refinement
//! only needs "what do I know about this symbol right now", and the CFG's
//! own block structure is enough to drive the fixpoint. Re-running over
//! SSA would just mean un-versioning symbols again before the verdict
//! passes, for no extra precision, since neither verifier needs phi nodes.

use super::errors::{AbstractInterpError, AbstractInterpResult};
use crate::features::abstract_domains::{transfer, AbstractValue, Bound, Interval, Nullability};
use crate::features::abstract_interp::domain::{AbstractState, Verdict, VerdictKind};
use crate::features::cfg::domain::{Block, BlockKind, Cfg, Instruction, OperationTag};
use crate::shared::models::{BlockId, Span, SymbolId};
use ahash::AHashMap;
use std::collections::VecDeque;

/// Loop headers widen after this many revisits (spec §4.6).
const WIDEN_AFTER_REVISITS: u32 = 3;
/// At most this many narrowing passes run after the main fixpoint settles.
const NARROW_PASSES: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct BlockState {
    pub in_state: AbstractState,
    pub out_state: AbstractState,
}

#[derive(Debug, Default)]
pub struct InterpResult {
    pub block_states: AHashMap<BlockId, BlockState>,
    pub verdicts: Vec<Verdict>,
}

pub struct AbstractInterpreter<'a> {
    cfg: &'a Cfg,
}

impl<'a> AbstractInterpreter<'a> {
    pub fn new(cfg: &'a Cfg) -> Self {
        Self { cfg }
    }

    pub fn run(&self, params: AbstractState) -> AbstractInterpResult<InterpResult> {
        if self.cfg.blocks.is_empty() {
            return Err(AbstractInterpError::EmptyCfg {
                function_id: self.cfg.function_id.clone(),
            });
        }

        let mut states: AHashMap<BlockId, BlockState> = AHashMap::new();
        states.insert(
            self.cfg.entry,
            BlockState {
                in_state: params,
                out_state: AbstractState::default(),
            },
        );

        let mut revisits: AHashMap<BlockId, u32> = AHashMap::new();
        let mut worklist: VecDeque<BlockId> = self.cfg.reverse_postorder().into();

        while let Some(block_id) = worklist.pop_front() {
            let block = self.cfg.block(block_id);
            let in_state = self.join_predecessors(block, &states);

            let mut out_state = in_state.clone();
            for &instr_id in &block.instructions {
                self.apply_instruction(self.cfg.instruction(instr_id), &mut out_state);
            }

            let widen_here = block.kind == BlockKind::LoopHeader && {
                let count = revisits.entry(block_id).or_insert(0);
                *count += 1;
                *count > WIDEN_AFTER_REVISITS
            };

            let prior = states.get(&block_id).map(|s| s.out_state.clone());
            let merged = match (&prior, widen_here) {
                (Some(old), true) => widen_state(old, &out_state),
                _ => out_state,
            };

            let changed = prior.as_ref().map(|old| *old != merged).unwrap_or(true);
            states.insert(
                block_id,
                BlockState {
                    in_state,
                    out_state: merged,
                },
            );

            if changed {
                for &succ in &block.successors {
                    worklist.push_back(succ);
                }
            }
        }

        self.narrow(&mut states);

        let verdicts = self.collect_verdicts(&states);
        Ok(InterpResult {
            block_states: states,
            verdicts,
        })
    }

    fn join_predecessors(&self, block: &Block, states: &AHashMap<BlockId, BlockState>) -> AbstractState {
        let mut result = AbstractState::default();
        for &pred in &block.predecessors {
            let Some(pred_state) = states.get(&pred) else {
                continue;
            };
            for (sym, value) in &pred_state.out_state {
                let entry = result.entry(*sym).or_insert_with(AbstractValue::bottom);
                *entry = entry.join(*value);
            }
        }
        if block.predecessors.is_empty() {
            if let Some(entry_state) = states.get(&block.id) {
                return entry_state.in_state.clone();
            }
        }
        result
    }

    fn apply_instruction(&self, instr: &Instruction, state: &mut AbstractState) {
        let operand_values: Vec<AbstractValue> = instr
            .operands
            .iter()
            .map(|sym| state.get(sym).copied().unwrap_or_else(AbstractValue::top))
            .collect();
        let result = transfer(&instr.op, &operand_values);
        if let Some(dst) = instr.result {
            state.insert(dst, result);
        }
    }

    /// Up to [`NARROW_PASSES`] re-applications of the transfer function,
    /// narrowing each block's out-state against the widened fixpoint
    /// (spec §4.5/§4.6). Stops early once a pass makes no change.
    fn narrow(&self, states: &mut AHashMap<BlockId, BlockState>) {
        let order = self.cfg.reverse_postorder();
        for _ in 0..NARROW_PASSES {
            let mut any_change = false;
            for &block_id in &order {
                let block = self.cfg.block(block_id);
                let in_state = self.join_predecessors(block, states);

                let mut out_state = in_state.clone();
                for &instr_id in &block.instructions {
                    self.apply_instruction(self.cfg.instruction(instr_id), &mut out_state);
                }

                let entry = states.entry(block_id).or_insert_with(BlockState::default);
                let narrowed = narrow_state(&entry.out_state, &out_state);
                if narrowed != entry.out_state {
                    any_change = true;
                }
                entry.in_state = in_state;
                entry.out_state = narrowed;
            }
            if !any_change {
                break;
            }
        }
    }

    fn collect_verdicts(&self, states: &AHashMap<BlockId, BlockState>) -> Vec<Verdict> {
        let mut verdicts = Vec::new();
        for block in &self.cfg.blocks {
            let Some(block_state) = states.get(&block.id) else {
                continue;
            };
            let mut local = block_state.in_state.clone();
            for &instr_id in &block.instructions {
                let instr = self.cfg.instruction(instr_id);
                self.emit_null_verdict(block.id, instr, &local, &mut verdicts);
                self.emit_bounds_verdict(block.id, instr, &local, &mut verdicts);
                self.apply_instruction(instr, &mut local);
            }
        }
        verdicts
    }

    fn emit_null_verdict(&self, block: BlockId, instr: &Instruction, state: &AbstractState, out: &mut Vec<Verdict>) {
        let receiver = match instr.op {
            OperationTag::Load | OperationTag::IndexLoad | OperationTag::IndexStore => instr.operands.first(),
            OperationTag::Call => instr.operands.first(),
            _ => return,
        };
        let Some(receiver) = receiver else { return };
        let nullability = state
            .get(receiver)
            .map(|v| v.nullability)
            .unwrap_or(Nullability::Top);

        let (is_safe, is_definite, reason) = match nullability {
            Nullability::Null => (false, Some(true), "receiver is definitely null".to_string()),
            Nullability::Nullable | Nullability::Top => (
                false,
                Some(false),
                "receiver may be null on some path".to_string(),
            ),
            Nullability::NonNull | Nullability::Bottom => return,
        };

        out.push(Verdict {
            kind: VerdictKind::NullDereference,
            is_safe,
            is_definite,
            reason,
            site: instr.id,
            block,
            span: Span::default(),
        });
    }

    fn emit_bounds_verdict(&self, block: BlockId, instr: &Instruction, state: &AbstractState, out: &mut Vec<Verdict>) {
        if !matches!(instr.op, OperationTag::IndexLoad | OperationTag::IndexStore) {
            return;
        }
        let Some(index_sym) = instr.operands.get(1) else {
            return;
        };
        let index_interval = state
            .get(index_sym)
            .map(|v| v.interval)
            .unwrap_or_else(Interval::top);

        // No `len(x)` size facts reach the IR (no array-size modeling in
        // the CFG), so the upper bound of `len(x)-1` is always unknown and
        // the valid range collapses to `[0, +inf)`. Conservative-only.
        // See DESIGN.md.
        let valid_range = Interval::range(Bound::Finite(0), Bound::PosInf);

        let overlap = index_interval.meet(valid_range);
        let (is_safe, is_definite, reason) = if overlap == Interval::bottom() {
            (false, Some(true), "index interval is disjoint from valid range".to_string())
        } else if overlap == index_interval {
            (true, Some(true), "index interval is within known bounds".to_string())
        } else {
            (false, Some(false), "index interval partially overlaps valid range".to_string())
        };

        if is_safe {
            return;
        }

        out.push(Verdict {
            kind: VerdictKind::OutOfBounds,
            is_safe,
            is_definite,
            reason,
            site: instr.id,
            block,
            span: Span::default(),
        });
    }
}

fn widen_state(old: &AbstractState, new: &AbstractState) -> AbstractState {
    let mut result = old.clone();
    for (sym, value) in new {
        let entry = result.entry(*sym).or_insert_with(AbstractValue::bottom);
        *entry = entry.widen(*value);
    }
    result
}

fn narrow_state(old: &AbstractState, new: &AbstractState) -> AbstractState {
    let mut result = old.clone();
    for (sym, value) in new {
        let entry = result.entry(*sym).or_insert_with(AbstractValue::bottom);
        *entry = entry.narrow(*value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cfg::domain::{BinOpKind, BlockKind, Instruction, OperationTag};
    use crate::shared::models::InstructionId;

    fn leaf_block(id: u32, kind: BlockKind) -> Block {
        Block::new(BlockId(id), kind)
    }

    #[test]
    fn alloc_result_is_non_null_at_exit() {
        let x = SymbolId(0);
        let mut entry = leaf_block(0, BlockKind::Entry);
        let mut exit = leaf_block(1, BlockKind::Exit);
        entry.successors.insert(BlockId(1));
        exit.predecessors.insert(BlockId(0));
        entry.instructions.push(InstructionId(0));

        let cfg = Cfg {
            function_id: "f".into(),
            entry: BlockId(0),
            exit: BlockId(1),
            blocks: vec![entry, exit],
            instructions: vec![Instruction {
                id: InstructionId(0),
                node: 0,
                op: OperationTag::Alloc,
                operands: vec![],
                result: Some(x),
            }],
        };

        let result = AbstractInterpreter::new(&cfg).run(AbstractState::default()).unwrap();
        let exit_state = &result.block_states[&BlockId(1)].out_state;
        assert_eq!(exit_state[&x].nullability, Nullability::NonNull);
    }

    #[test]
    fn load_through_nullable_receiver_yields_potential_verdict() {
        let recv = SymbolId(0);
        let dst = SymbolId(1);
        let mut entry = leaf_block(0, BlockKind::Entry);
        let mut exit = leaf_block(1, BlockKind::Exit);
        entry.successors.insert(BlockId(1));
        exit.predecessors.insert(BlockId(0));
        entry.instructions.push(InstructionId(0));

        let cfg = Cfg {
            function_id: "f".into(),
            entry: BlockId(0),
            exit: BlockId(1),
            blocks: vec![entry, exit],
            instructions: vec![Instruction {
                id: InstructionId(0),
                node: 0,
                op: OperationTag::Load,
                operands: vec![recv],
                result: Some(dst),
            }],
        };

        let mut params = AbstractState::default();
        params.insert(recv, AbstractValue::top());
        let result = AbstractInterpreter::new(&cfg).run(params).unwrap();

        assert_eq!(result.verdicts.len(), 1);
        assert_eq!(result.verdicts[0].kind, VerdictKind::NullDereference);
        assert!(!result.verdicts[0].is_safe);
    }

    #[test]
    fn unreferenced_binop_operand_defaults_to_top() {
        let a = SymbolId(0);
        let b = SymbolId(1);
        let dst = SymbolId(2);
        let mut entry = leaf_block(0, BlockKind::Entry);
        let mut exit = leaf_block(1, BlockKind::Exit);
        entry.successors.insert(BlockId(1));
        exit.predecessors.insert(BlockId(0));
        entry.instructions.push(InstructionId(0));

        let cfg = Cfg {
            function_id: "f".into(),
            entry: BlockId(0),
            exit: BlockId(1),
            blocks: vec![entry, exit],
            instructions: vec![Instruction {
                id: InstructionId(0),
                node: 0,
                op: OperationTag::BinOp(BinOpKind::Add),
                operands: vec![a, b],
                result: Some(dst),
            }],
        };

        let result = AbstractInterpreter::new(&cfg).run(AbstractState::default()).unwrap();
        let exit_state = &result.block_states[&BlockId(1)].out_state;
        assert_eq!(exit_state[&dst].interval, Interval::top());
    }
}
