//! Per-file and per-project orchestration (spec §5).
//!
//! Wires C1-C10 into one run: discover functions in a file, analyze each
//! independently, fold into a `FileReport`, then fold every file into one
//! `ProjectReport` through a single-writer aggregator. Sequential by
//! default; [`run_project`]'s `parallel` flag opts into a rayon worker pool
//! since per-file analyses share no mutable state.

mod analyze_file;
mod analyze_function;
mod discover;
mod run_project;

pub use analyze_file::{analyze_file, FileOutcome, SkipNote};
pub use analyze_function::{analyze_function, FunctionOutcome};
pub use discover::{find_functions, FoundFunction};
pub use run_project::{run_project, CancelSignal, FileInput};
