//! LSP-shaped diagnostic records (spec §4.11, §6).

use crate::shared::models::Severity;
use serde::{Deserialize, Serialize};

/// 0-based position, matching the LSP convention. The core's own
/// [`crate::shared::models::Location`] is 1-based line / 0-based column;
/// this type is only ever produced at the boundary by [`to_range`](super::infrastructure::to_range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub range: Range,
    pub source: &'static str,
    pub code: String,
}

pub const DIAGNOSTIC_SOURCE: &str = "anteater";
