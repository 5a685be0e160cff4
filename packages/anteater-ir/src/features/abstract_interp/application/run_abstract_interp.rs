use crate::features::abstract_interp::domain::AbstractState;
use crate::features::abstract_interp::infrastructure::{AbstractInterpreter, InterpResult};
use crate::features::cfg::domain::Cfg;
use crate::{AnteaterError, ErrorKind, Result};

/// Runs the null/interval worklist over `cfg`, seeded with `params` (the
/// entry block's parameters mapped to their declared nullability/interval,
/// `⊤` for anything unannotated - spec §4.6).
pub fn run_abstract_interp(cfg: &Cfg, params: AbstractState) -> Result<InterpResult> {
    AbstractInterpreter::new(cfg).run(params).map_err(|e| {
        AnteaterError::new(ErrorKind::AbstractInterp, e.to_string())
            .with_function(cfg.function_id.clone())
            .with_source(e)
    })
}
