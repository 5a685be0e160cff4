//! Re-exports of the value types this feature rolls up, so downstream
//! consumers (pipeline, diagnostics adapter) depend on one module path.

pub use crate::features::abstract_interp::Verdict;
pub use crate::features::debt::{DebtItem, DebtSummary};
pub use crate::features::maintainability::{MaintainabilityIndex, Rating};
pub use crate::features::style_rules::Violation;
