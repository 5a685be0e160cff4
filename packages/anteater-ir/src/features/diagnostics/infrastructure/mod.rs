mod convert;

pub use convert::{debt_item_to_diagnostic, to_range, verdict_to_diagnostic, violation_to_diagnostic};
