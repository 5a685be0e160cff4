pub use crate::features::abstract_interp::Verdict;
pub use crate::features::aggregator::FunctionMetrics;
pub use crate::features::debt::DebtItem;
pub use crate::features::style_rules::Violation;
