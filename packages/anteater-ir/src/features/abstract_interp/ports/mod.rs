//! Collaborators this feature consumes from C1/C5.

pub use crate::features::abstract_domains::AbstractValue;
pub use crate::features::cfg::domain::Cfg;
