//! Application: the CFG-building use case.

mod build_cfg;

pub use build_cfg::build_cfg;
