mod detect_debt;

pub use detect_debt::detect_debt;
