//! SSA construction errors (spec §4.2, §8).

use crate::shared::models::{BlockId, SymbolId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SsaError {
    #[error("function '{function_id}' has no blocks")]
    EmptyCfg { function_id: String },

    #[error("block {block} referenced but not present in the CFG")]
    BlockNotFound { block: BlockId },

    #[error("no definition of symbol {symbol} reaches use in block {block}")]
    UndefinedUse { symbol: SymbolId, block: BlockId },

    #[error("phi for symbol {symbol} in block {block} expected {expected} operands, got {actual}")]
    PhiArityMismatch {
        symbol: SymbolId,
        block: BlockId,
        expected: usize,
        actual: usize,
    },
}

pub type SsaResult<T> = std::result::Result<T, SsaError>;
