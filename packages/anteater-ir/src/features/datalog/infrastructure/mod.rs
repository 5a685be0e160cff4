//! Infrastructure: the semi-naive evaluator and its built-in program.

mod builtin_rules;
mod engine;
mod errors;
mod stratify;
mod validate;

pub use builtin_rules::{builtin_program, derived_predicates, edb_arities};
pub use engine::DatalogEngine;
pub use errors::{DatalogProgramError, DatalogResult};
