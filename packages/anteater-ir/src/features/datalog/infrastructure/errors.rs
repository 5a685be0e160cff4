//! Datalog evaluation failures (spec §4.4).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatalogProgramError {
    #[error("negation cycles through predicate '{predicate}'")]
    CyclicNegation { predicate: String },

    #[error("rule for '{predicate}' is unsafe: variable '{variable}' does not appear in a positive body literal")]
    UnsafeRule { predicate: String, variable: String },

    #[error("predicate '{predicate}' used with arity {got}, expected {expected}")]
    ArityMismatch {
        predicate: String,
        expected: usize,
        got: usize,
    },
}

pub type DatalogResult<T> = std::result::Result<T, DatalogProgramError>;
