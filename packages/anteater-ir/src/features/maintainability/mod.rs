//! C8: Maintainability Index over Halstead volume, cyclomatic complexity
//! and lines of code (spec §4.7).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::compute_mi;
pub use domain::{MaintainabilityIndex, Rating};
pub use infrastructure::MaintainabilityCalculator;
