//! Error types for anteater-storage.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Database,
    Serialization,
    ReportNotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Database => "database",
            ErrorKind::Serialization => "serialization",
            ErrorKind::ReportNotFound => "report_not_found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), source: None }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn report_not_found(repo_id: impl Into<String>, commit: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReportNotFound, format!("no report for {}@{}", repo_id.into(), commit.into()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::new(ErrorKind::Database, format!("sqlite error: {err}")).with_source(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::new(ErrorKind::Serialization, format!("json error: {err}")).with_source(err)
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_not_found_message_names_the_key() {
        let err = StorageError::report_not_found("my-repo", "abc123");
        assert!(err.message.contains("my-repo"));
        assert!(err.message.contains("abc123"));
        assert_eq!(err.kind, ErrorKind::ReportNotFound);
    }

    #[test]
    fn display_matches_teacher_bracketed_format() {
        let err = StorageError::new(ErrorKind::Database, "connection failed");
        assert_eq!(err.to_string(), "[database] connection failed");
    }
}
