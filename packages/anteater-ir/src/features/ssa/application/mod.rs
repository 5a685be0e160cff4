//! Application: the SSA-building use case.

mod build_ssa;

pub use build_ssa::build_ssa;
