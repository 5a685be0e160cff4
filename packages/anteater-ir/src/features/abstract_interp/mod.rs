//! C6: Abstract Interpreter - worklist fixpoint over the CFG, NullVerifier
//! and BoundsChecker verdicts (spec §4.6).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::run_abstract_interp;
pub use domain::{AbstractState, Verdict, VerdictKind};
pub use infrastructure::{AbstractInterpError, AbstractInterpreter, BlockState, InterpResult};
