//! Use case: build SSA form for one function's CFG.

use crate::features::cfg::domain::Cfg;
use crate::features::ssa::domain::SsaGraph;
use crate::features::ssa::infrastructure::SsaBuilder;
use crate::{AnteaterError, ErrorKind, Result};

/// Builds SSA form over `cfg`. A failure here skips the function's
/// SSA-dependent analyses (facts, Datalog, abstract interpretation) but
/// does not abort the run (spec §7: SSA failures are reported as info).
pub fn build_ssa(cfg: &Cfg) -> Result<SsaGraph> {
    SsaBuilder::new(cfg).build().map_err(|e| {
        AnteaterError::new(ErrorKind::Ssa, e.to_string())
            .with_function(cfg.function_id.clone())
            .with_source(e)
    })
}
