//! Fact extraction (spec §4.3): a single deterministic pass over SSA
//! emitting typed tuples. Blocks are visited in postorder, instructions in
//! program order, matching the CFG's own deterministic traversal.
//!
//! `MayAlias`, `PointsTo`, `Mutable` and `Escapes` are not extracted here -
//! they are derived facts, produced by the Datalog engine's built-in rules
//! from the `Alloc`/`Store`/`Load` facts this pass emits (spec §4.4).
//!
//! SSA versioned symbols are interned into a flat fact-constant id space in
//! first-seen order, so the same program always yields the same `Const::Sym`
//! numbering regardless of hashmap iteration order elsewhere in the pipeline.

use crate::features::cfg::domain::{Cfg, OperationTag};
use crate::features::facts::domain::{Const, Fact, FactSet, Predicate};
use crate::features::ssa::domain::{SsaGraph, VersionedSymbol};
use ahash::AHashMap as HashMap;

pub struct FactExtractor<'a> {
    cfg: &'a Cfg,
    ssa: &'a SsaGraph,
}

impl<'a> FactExtractor<'a> {
    pub fn new(cfg: &'a Cfg, ssa: &'a SsaGraph) -> Self {
        Self { cfg, ssa }
    }

    pub fn extract(self) -> FactSet {
        tracing::debug!(function = %self.cfg.function_id, "extracting facts");
        let mut facts = FactSet::default();
        let mut interned: HashMap<VersionedSymbol, u32> = HashMap::new();

        for block in self.cfg.postorder() {
            for &succ in &self.cfg.block(block).successors {
                facts.push(Fact::new(
                    Predicate::EdgeCf,
                    vec![Const::Block(block.0), Const::Block(succ.0)],
                ));
            }

            let mut ancestor = block;
            while let Some(&idom) = self.ssa.idom.get(&ancestor) {
                if idom == ancestor {
                    break;
                }
                facts.push(Fact::new(
                    Predicate::Dominates,
                    vec![Const::Block(idom.0), Const::Block(block.0)],
                ));
                ancestor = idom;
            }

            let Some(ssa_block) = self.ssa.block(block) else {
                continue;
            };
            for instr in &ssa_block.instructions {
                let cfg_instr = self.cfg.instruction(instr.instruction);
                let sym = |vs: &VersionedSymbol, interned: &mut HashMap<VersionedSymbol, u32>| {
                    let next = interned.len() as u32;
                    Const::Sym(*interned.entry(*vs).or_insert(next))
                };
                let site = Const::Site(cfg_instr.id.0);

                match &cfg_instr.op {
                    OperationTag::Assign => {
                        if let (Some(dst), Some(src)) = (&instr.result, instr.operands.first()) {
                            facts.push(Fact::new(
                                Predicate::Assign,
                                vec![sym(dst, &mut interned), sym(src, &mut interned)],
                            ));
                        }
                    }
                    OperationTag::Call => {
                        let callee = instr
                            .operands
                            .first()
                            .map(|v| sym(v, &mut interned))
                            .unwrap_or(Const::Str("unknown".into()));
                        for (i, arg) in instr.operands.iter().enumerate().skip(1) {
                            facts.push(Fact::new(
                                Predicate::Call,
                                vec![site.clone(), callee.clone(), Const::Int(i as i64), sym(arg, &mut interned)],
                            ));
                        }
                    }
                    OperationTag::Load | OperationTag::IndexLoad => {
                        if let (Some(dst), Some(base)) = (&instr.result, instr.operands.first()) {
                            let field = instr
                                .operands
                                .get(1)
                                .map(|v| sym(v, &mut interned))
                                .unwrap_or(site.clone());
                            facts.push(Fact::new(
                                Predicate::Load,
                                vec![sym(dst, &mut interned), sym(base, &mut interned), field],
                            ));
                        }
                    }
                    OperationTag::Store | OperationTag::IndexStore => {
                        if instr.operands.len() >= 2 {
                            let base = sym(&instr.operands[0], &mut interned);
                            let (field, src) = if instr.operands.len() >= 3 {
                                (sym(&instr.operands[1], &mut interned), sym(&instr.operands[2], &mut interned))
                            } else {
                                (site.clone(), sym(&instr.operands[1], &mut interned))
                            };
                            facts.push(Fact::new(Predicate::Store, vec![base, field, src]));
                        }
                    }
                    OperationTag::Alloc => {
                        // Extends the spec's `Alloc(site,type)` with the
                        // destination symbol so the Datalog engine's
                        // Andersen-style `PointsTo` rule has a variable to
                        // seed from; `site` alone cannot be joined against a
                        // use without it. See DESIGN.md.
                        if let Some(dst) = &instr.result {
                            facts.push(Fact::new(
                                Predicate::Alloc,
                                vec![sym(dst, &mut interned), site.clone(), Const::Str("object".into())],
                            ));
                        }
                    }
                    _ => {}
                }
            }
        }

        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cfg::domain::{Block, BlockKind, Instruction};
    use crate::features::ssa::infrastructure::SsaBuilder;
    use crate::shared::models::{InstructionId, SymbolId};

    #[test]
    fn alloc_and_store_emit_expected_predicates() {
        let x = SymbolId(0);
        let mut entry = Block::new(crate::shared::models::BlockId(0), BlockKind::Entry);
        let exit = Block::new(crate::shared::models::BlockId(1), BlockKind::Exit);

        let alloc = Instruction {
            id: InstructionId(0),
            node: 0,
            op: OperationTag::Alloc,
            operands: vec![],
            result: Some(x),
        };
        entry.instructions.push(InstructionId(0));
        entry.successors.insert(crate::shared::models::BlockId(1));
        let mut exit = exit;
        exit.predecessors.insert(crate::shared::models::BlockId(0));

        let cfg = Cfg {
            function_id: "f".into(),
            entry: crate::shared::models::BlockId(0),
            exit: crate::shared::models::BlockId(1),
            blocks: vec![entry, exit],
            instructions: vec![alloc],
        };
        let ssa = SsaBuilder::new(&cfg).build().unwrap();
        let facts = FactExtractor::new(&cfg, &ssa).extract();

        assert!(facts.by_predicate(Predicate::Alloc).count() == 1);
        assert!(facts.by_predicate(Predicate::EdgeCf).count() == 1);
    }
}
