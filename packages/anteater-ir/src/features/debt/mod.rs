//! C10: Debt Detector & Cost Calculator (spec §4.9).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::detect_debt;
pub use domain::{DebtItem, DebtSeverity, DebtSummary, DebtType};
pub use infrastructure::DebtCostCalculator;
