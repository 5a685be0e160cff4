pub use crate::features::complexity::{ComplexityMetrics, HalsteadMetrics};
