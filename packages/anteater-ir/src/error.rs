//! Unified error type for the anteater-ir crate.
//!
//! Per-feature errors (CfgBuildError, SsaError, DatalogProgramError, ...)
//! carry their own structured context; this type gives callers a single
//! `Result` alias and a stable `ErrorKind` for the "skipped" report section
//! (spec §7).

use std::fmt;

/// Error kind categorization, one per pipeline stage that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Parsing failed upstream (external collaborator) - file skipped.
    Parse,
    /// CFG construction failed - function skipped.
    CfgBuild,
    /// SSA construction failed - function skipped, reported as info.
    Ssa,
    /// Static Datalog program is malformed - fatal for the run.
    DatalogProgram,
    /// Abstract-interpretation worklist failed - function skipped.
    AbstractInterp,
    /// Per-function or per-project analysis was cancelled.
    AnalysisAborted,
    /// Configuration failed validation - fatal at start-up.
    Config,
    /// Internal invariant violation (bug).
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::CfgBuild => "cfg_build",
            ErrorKind::Ssa => "ssa",
            ErrorKind::DatalogProgram => "datalog_program",
            ErrorKind::AbstractInterp => "abstract_interp",
            ErrorKind::AnalysisAborted => "analysis_aborted",
            ErrorKind::Config => "config",
            ErrorKind::Internal => "internal",
        }
    }

    /// Whether a failure of this kind aborts only the current function
    /// (vs. the whole run). See spec §7.
    pub fn is_per_function(&self) -> bool {
        matches!(self, ErrorKind::CfgBuild | ErrorKind::Ssa | ErrorKind::AbstractInterp)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type.
#[derive(Debug)]
pub struct AnteaterError {
    pub kind: ErrorKind,
    pub message: String,
    pub function_id: Option<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AnteaterError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            function_id: None,
            source: None,
        }
    }

    pub fn with_function(mut self, function_id: impl Into<String>) -> Self {
        self.function_id = Some(function_id.into());
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for AnteaterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function_id {
            Some(fid) => write!(f, "[{}] {} (function: {})", self.kind, self.message, fid),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for AnteaterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type Result<T> = std::result::Result<T, AnteaterError>;
