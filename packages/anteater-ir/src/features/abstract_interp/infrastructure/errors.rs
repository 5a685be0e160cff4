//! Errors raised while running the abstract-interpretation worklist.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbstractInterpError {
    #[error("cfg for function `{function_id}` has no blocks")]
    EmptyCfg { function_id: String },
}

pub type AbstractInterpResult<T> = Result<T, AbstractInterpError>;
