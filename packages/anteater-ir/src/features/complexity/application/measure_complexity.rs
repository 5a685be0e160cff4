use crate::features::complexity::domain::{ComplexityMetrics, HalsteadMetrics};
use crate::features::complexity::infrastructure::{ComplexityCalculator, HalsteadCalculator};
use crate::shared::ast::{AstVisitor, NodeId};

/// Computes cyclomatic, cognitive and Halstead metrics for one function
/// body in a single call (spec §4.7).
pub fn measure_complexity<V: AstVisitor>(
    ast: &V,
    body: NodeId,
    function_name: Option<&str>,
) -> (ComplexityMetrics, HalsteadMetrics) {
    let complexity = ComplexityCalculator::new(ast, function_name).calculate(body);
    let halstead = HalsteadCalculator::new(ast).calculate(body);
    (complexity, halstead)
}
