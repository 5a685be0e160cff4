//! SQLite-backed `ReportStore`, keyed by `(repo_id, commit)` (spec §6).
//!
//! `rusqlite::Connection` is `!Sync`; callers that need to share one store
//! across threads (e.g. a CLI driver diffing two runs) must wrap it in
//! their own `Mutex`/`Arc` the same way the teacher's storage crate leaves
//! that choice to its callers rather than baking in its own locking.

use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{ReportRecord, ReportStore};
use crate::error::StorageError;
use crate::Result;
use anteater_ir::features::aggregator::ProjectReport;

pub struct SqliteReportStore {
    conn: Mutex<Connection>,
}

impl SqliteReportStore {
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS reports (
                repo_id     TEXT NOT NULL,
                commit_hash TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                report_json TEXT NOT NULL,
                PRIMARY KEY (repo_id, commit_hash)
            )",
            [],
        )?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

impl ReportStore for SqliteReportStore {
    fn save_report(&self, repo_id: &str, commit: &str, report: &ProjectReport) -> Result<()> {
        let json = serde_json::to_string(report)?;
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().expect("report store mutex poisoned");
        conn.execute(
            "INSERT OR REPLACE INTO reports (repo_id, commit_hash, created_at, report_json) VALUES (?1, ?2, ?3, ?4)",
            params![repo_id, commit, now, json],
        )?;
        Ok(())
    }

    fn load_report(&self, repo_id: &str, commit: &str) -> Result<Option<ProjectReport>> {
        let conn = self.conn.lock().expect("report store mutex poisoned");
        let json: Option<String> = conn
            .query_row(
                "SELECT report_json FROM reports WHERE repo_id = ?1 AND commit_hash = ?2",
                params![repo_id, commit],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn list_reports(&self, repo_id: &str, limit: Option<usize>) -> Result<Vec<ReportRecord>> {
        let conn = self.conn.lock().expect("report store mutex poisoned");
        let limit = limit.unwrap_or(i64::MAX as usize) as i64;
        let mut stmt = conn.prepare(
            "SELECT commit_hash, created_at, report_json FROM reports
             WHERE repo_id = ?1 ORDER BY created_at DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![repo_id, limit], |row| {
                let commit: String = row.get(0)?;
                let created_at: String = row.get(1)?;
                let report_json: String = row.get(2)?;
                Ok((commit, created_at, report_json))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(commit, created_at, report_json)| {
                let created_at = created_at
                    .parse()
                    .map_err(|e: chrono::ParseError| StorageError::new(crate::error::ErrorKind::Serialization, e.to_string()))?;
                let report = serde_json::from_str(&report_json)?;
                Ok(ReportRecord { repo_id: repo_id.to_string(), commit, created_at, report })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ProjectReport {
        ProjectReport::default()
    }

    #[test]
    fn round_trips_a_saved_report() {
        let store = SqliteReportStore::open_in_memory().unwrap();
        store.save_report("my-repo", "abc123", &sample_report()).unwrap();
        let loaded = store.load_report("my-repo", "abc123").unwrap();
        assert!(loaded.is_some());
    }

    #[test]
    fn missing_commit_returns_none() {
        let store = SqliteReportStore::open_in_memory().unwrap();
        assert!(store.load_report("my-repo", "nope").unwrap().is_none());
    }

    #[test]
    fn list_reports_orders_newest_first() {
        let store = SqliteReportStore::open_in_memory().unwrap();
        store.save_report("my-repo", "c1", &sample_report()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        store.save_report("my-repo", "c2", &sample_report()).unwrap();

        let records = store.list_reports("my-repo", None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].commit, "c2");
    }

    #[test]
    fn survives_reopening_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.db");

        {
            let store = SqliteReportStore::open(&path).unwrap();
            store.save_report("my-repo", "abc123", &sample_report()).unwrap();
        }

        let store = SqliteReportStore::open(&path).unwrap();
        assert!(store.load_report("my-repo", "abc123").unwrap().is_some());
    }

    #[test]
    fn saving_the_same_commit_twice_replaces_the_report() {
        let store = SqliteReportStore::open_in_memory().unwrap();
        store.save_report("my-repo", "c1", &sample_report()).unwrap();
        store.save_report("my-repo", "c1", &sample_report()).unwrap();
        let records = store.list_reports("my-repo", None).unwrap();
        assert_eq!(records.len(), 1);
    }
}
