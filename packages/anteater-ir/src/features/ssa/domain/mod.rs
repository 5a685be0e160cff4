//! SSA domain model (spec §3, §4.2).

use crate::shared::models::{BlockId, SymbolId};
use ahash::AHashMap as HashMap;
use serde::{Deserialize, Serialize};

/// A versioned occurrence of a symbol: `sym#k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(pub u32);

/// A symbol at a specific SSA version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionedSymbol {
    pub symbol: SymbolId,
    pub version: Version,
}

impl VersionedSymbol {
    pub fn new(symbol: SymbolId, version: Version) -> Self {
        Self { symbol, version }
    }
}

impl std::fmt::Display for VersionedSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.symbol, self.version.0)
    }
}

/// A phi node: reconciles one versioned symbol per predecessor block into
/// a single new version, in predecessor order (spec §3 "phis: map symbol
/// => ordered list of (predBlock, versionedSymbol)").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phi {
    pub symbol: SymbolId,
    pub result: VersionedSymbol,
    pub operands: Vec<(BlockId, VersionedSymbol)>,
}

/// One instruction rewritten into SSA form: operands and result (if any)
/// are versioned symbols instead of plain symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsaInstruction {
    pub instruction: crate::shared::models::InstructionId,
    pub operands: Vec<VersionedSymbol>,
    pub result: Option<VersionedSymbol>,
}

/// The SSA overlay for a single block: its phis (in a stable, deterministic
/// order) followed by its rewritten instructions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsaBlock {
    pub phis: Vec<Phi>,
    pub instructions: Vec<SsaInstruction>,
}

/// SSA form over one function's CFG.
///
/// Invariant (spec §8 "SSA dominance"): for every use of `v#k`, the unique
/// definition of `v#k` dominates that use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsaGraph {
    pub function_id: String,
    pub blocks: HashMap<BlockId, SsaBlock>,
    pub idom: HashMap<BlockId, BlockId>,
    pub dominance_frontier: HashMap<BlockId, Vec<BlockId>>,
}

impl SsaGraph {
    pub fn block(&self, id: BlockId) -> Option<&SsaBlock> {
        self.blocks.get(&id)
    }

    /// True if `a` dominates `b` (every block dominates itself).
    pub fn dominates(&self, a: BlockId, b: BlockId) -> bool {
        if a == b {
            return true;
        }
        let mut cur = b;
        while let Some(&idom) = self.idom.get(&cur) {
            if idom == a {
                return true;
            }
            if idom == cur {
                break;
            }
            cur = idom;
        }
        false
    }
}
