//! `MI = max(0, (171 - 5.2*ln(V) - 0.23*CC - 16.2*ln(LOC)) * 100 / 171)`
//! (spec §4.7), with the two stated edge cases: `LOC=0` short-circuits to
//! 100, and a `V=0` Halstead volume is treated as `V=1` so `ln(V)` stays
//! defined.

use crate::features::maintainability::domain::MaintainabilityIndex;

pub struct MaintainabilityCalculator;

impl MaintainabilityCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, volume: f64, cyclomatic: u32, lines_of_code: u32) -> MaintainabilityIndex {
        if lines_of_code == 0 {
            return MaintainabilityIndex(100.0);
        }
        let volume = if volume <= 0.0 { 1.0 } else { volume };
        let raw = 171.0 - 5.2 * volume.ln() - 0.23 * cyclomatic as f64 - 16.2 * (lines_of_code as f64).ln();
        MaintainabilityIndex((raw * 100.0 / 171.0).max(0.0))
    }
}

impl Default for MaintainabilityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_loc_is_perfectly_maintainable() {
        let mi = MaintainabilityCalculator::new().calculate(500.0, 10, 0);
        assert_eq!(mi.0, 100.0);
    }

    #[test]
    fn zero_volume_is_treated_as_one() {
        let with_zero = MaintainabilityCalculator::new().calculate(0.0, 1, 10);
        let with_one = MaintainabilityCalculator::new().calculate(1.0, 1, 10);
        assert_eq!(with_zero, with_one);
    }

    #[test]
    fn high_complexity_and_volume_floor_at_zero() {
        let mi = MaintainabilityCalculator::new().calculate(1_000_000.0, 500, 100_000);
        assert_eq!(mi.0, 0.0);
    }
}
