//! Complexity metrics (spec §4.7).

use serde::{Deserialize, Serialize};

/// Cyclomatic + cognitive complexity for a single function body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    pub cyclomatic: u32,
    pub cognitive: u32,
}

/// Halstead operator/operand tallies and derived volume (spec §4.7).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HalsteadMetrics {
    pub distinct_operators: u32,
    pub distinct_operands: u32,
    pub total_operators: u32,
    pub total_operands: u32,
}

impl HalsteadMetrics {
    pub fn vocabulary(&self) -> u32 {
        self.distinct_operators + self.distinct_operands
    }

    pub fn length(&self) -> u32 {
        self.total_operators + self.total_operands
    }

    /// `V = (N1+N2) * log2(eta1+eta2)`; vocabulary <= 1 yields `V = 0`
    /// (spec §4.7 - there is nothing to distinguish with a single symbol).
    pub fn volume(&self) -> f64 {
        let vocabulary = self.vocabulary();
        if vocabulary <= 1 {
            return 0.0;
        }
        self.length() as f64 * (vocabulary as f64).log2()
    }
}
