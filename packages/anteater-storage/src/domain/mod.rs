//! Commit-keyed report persistence (spec §6: "diff against last run").
//!
//! Mirrors the teacher's `CodeSnapshotStore` identity model — snapshot id
//! is the commit hash, records are immutable once saved — but the only
//! payload here is one `ProjectReport` per `(repo, commit)`, not a
//! chunk/dependency graph.

use anteater_ir::features::aggregator::ProjectReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// One saved report, tagged with the repository/commit it was produced
/// from and when it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub repo_id: String,
    pub commit: String,
    pub created_at: DateTime<Utc>,
    pub report: ProjectReport,
}

/// Report storage abstraction. `(repo_id, commit)` is the identity of a
/// report; saving again under the same pair replaces the prior report
/// (e.g. re-running after a rule config change), it does not append one.
pub trait ReportStore {
    fn save_report(&self, repo_id: &str, commit: &str, report: &ProjectReport) -> Result<()>;

    fn load_report(&self, repo_id: &str, commit: &str) -> Result<Option<ProjectReport>>;

    /// Most recent reports for a repository, newest first.
    fn list_reports(&self, repo_id: &str, limit: Option<usize>) -> Result<Vec<ReportRecord>>;
}
