//! Use case: run the built-in Datalog program over one function's facts.

use crate::features::datalog::infrastructure::{builtin_program, edb_arities, DatalogEngine};
use crate::features::facts::domain::FactSet;
use crate::{AnteaterError, ErrorKind, Result};

/// Loads `facts` and evaluates the built-in program to fixpoint, returning
/// the engine so callers can query derived relations (`Reaches`,
/// `MayAlias`, `PointsTo`, `Mutable`, `Escapes`).
pub fn derive_facts(facts: &FactSet) -> Result<DatalogEngine> {
    let mut engine = DatalogEngine::new();
    engine.load_facts(facts);
    engine
        .run(&builtin_program(), &edb_arities())
        .map_err(|e| AnteaterError::new(ErrorKind::DatalogProgram, e.to_string()).with_source(e))?;
    Ok(engine)
}
