//! Technical-debt items, types and severities (spec §4.9).

use crate::shared::models::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebtSeverity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebtType {
    Todo,
    Fixme,
    Hack,
    AsDynamic,
    Deprecated,
    Ignore,
    EmptyCatch,
    GodClass,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::Todo => "todo",
            DebtType::Fixme => "fixme",
            DebtType::Hack => "hack",
            DebtType::AsDynamic => "as-dynamic",
            DebtType::Deprecated => "deprecated",
            DebtType::Ignore => "ignore",
            DebtType::EmptyCatch => "empty-catch",
            DebtType::GodClass => "god-class",
        }
    }

    /// Default severity absent a rule override (spec §4.9 does not tie
    /// severity to configuration, only cost; each type gets one fixed
    /// default).
    pub fn default_severity(&self) -> DebtSeverity {
        match self {
            DebtType::Todo => DebtSeverity::Low,
            DebtType::Fixme => DebtSeverity::Medium,
            DebtType::Hack => DebtSeverity::Medium,
            DebtType::AsDynamic => DebtSeverity::High,
            DebtType::Deprecated => DebtSeverity::Low,
            DebtType::Ignore => DebtSeverity::Medium,
            DebtType::EmptyCatch => DebtSeverity::High,
            DebtType::GodClass => DebtSeverity::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtItem {
    pub debt_type: DebtType,
    pub severity: DebtSeverity,
    pub message: String,
    pub span: Span,
    pub cost: f64,
}

/// Per-type, per-severity roll-up plus hotspot/type rankings (spec §4.9).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtSummary {
    pub items: Vec<DebtItem>,
    pub total_cost: f64,
    pub exceeds_threshold: bool,
    pub by_type: Vec<(DebtType, f64, usize)>,
}
