//! C5: Abstract Domains - Interval, Nullability lattices (spec §4.5).

pub mod domain;
pub mod infrastructure;

pub use domain::{AbstractValue, Bound, Interval, Nullability};
pub use infrastructure::transfer;
