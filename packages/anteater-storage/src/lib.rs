//! anteater-storage — commit-keyed persistence for `ProjectReport`s
//! (spec §6: "diff against last run").
//!
//! Grounded in the teacher's `codegraph-storage` crate's identity model
//! (snapshot id = commit hash, immutable once saved), reduced to the one
//! payload this system needs: a whole project report per `(repo, commit)`,
//! not a chunk/dependency graph.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{ReportRecord, ReportStore};
pub use error::{ErrorKind, Result, StorageError};
pub use infrastructure::SqliteReportStore;
