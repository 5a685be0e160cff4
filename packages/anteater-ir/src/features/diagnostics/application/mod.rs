mod build_diagnostics;

pub use build_diagnostics::build_diagnostics;
