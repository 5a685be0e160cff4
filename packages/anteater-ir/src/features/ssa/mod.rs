//! C2: Dominator + SSA Builder - CFG -> SSA with phi nodes (spec §4.2).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::build_ssa;
pub use domain::{Phi, SsaBlock, SsaGraph, SsaInstruction, Version, VersionedSymbol};
pub use infrastructure::{SsaError, SsaBuilder};
