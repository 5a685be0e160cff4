use crate::features::maintainability::domain::MaintainabilityIndex;
use crate::features::maintainability::infrastructure::MaintainabilityCalculator;
use crate::features::maintainability::ports::HalsteadMetrics;

pub fn compute_mi(halstead: &HalsteadMetrics, cyclomatic: u32, lines_of_code: u32) -> MaintainabilityIndex {
    MaintainabilityCalculator::new().calculate(halstead.volume(), cyclomatic, lines_of_code)
}
