mod ast_detectors;
mod cost;
mod lexical_scan;

pub use ast_detectors::detect_ast_debt;
pub use cost::DebtCostCalculator;
pub use lexical_scan::scan_lexical_debt;
