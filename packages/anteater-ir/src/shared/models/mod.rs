//! Common data types threaded through every feature.

mod severity;
mod span;
mod symbol;

pub use severity::Severity;
pub use span::{Location, Span};
pub use symbol::{BlockId, InstructionId, ScopeId, Symbol, SymbolId, TypeTag};
