//! C7: Complexity metrics - Cyclomatic, Cognitive, Halstead (spec §4.7).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::measure_complexity;
pub use domain::{ComplexityMetrics, HalsteadMetrics};
pub use infrastructure::{ComplexityCalculator, HalsteadCalculator};
