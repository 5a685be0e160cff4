//! C12: Diagnostics Adapter — unifies C6/C9/C10 findings into LSP-shaped
//! diagnostics (spec §4.11).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::build_diagnostics;
pub use domain::{Diagnostic, Position, Range};
