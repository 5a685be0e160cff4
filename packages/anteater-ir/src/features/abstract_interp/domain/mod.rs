//! Abstract-interpretation verdicts (spec §4.6).

use crate::shared::models::{BlockId, InstructionId, Span};
use serde::{Deserialize, Serialize};

/// A per-point map from symbol to lattice value.
pub type AbstractState = ahash::AHashMap<crate::shared::models::SymbolId, crate::features::abstract_domains::AbstractValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictKind {
    NullDereference,
    OutOfBounds,
}

/// `{isSafe, isDefinite?, reason, site}` (spec §4.6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub kind: VerdictKind,
    pub is_safe: bool,
    pub is_definite: Option<bool>,
    pub reason: String,
    pub site: InstructionId,
    pub block: BlockId,
    pub span: Span,
}
