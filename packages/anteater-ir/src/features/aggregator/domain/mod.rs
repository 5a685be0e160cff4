//! Per-function, per-file and per-project roll-ups (spec §4.10).

use crate::features::abstract_interp::Verdict;
use crate::features::datalog::Tuple;
use crate::features::debt::DebtItem;
use crate::features::maintainability::Rating;
use crate::features::style_rules::Violation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionMetrics {
    pub function_id: String,
    pub cyclomatic: u32,
    pub cognitive: u32,
    pub maintainability_index: f64,
    pub lines_of_code: u32,
    pub violations: Vec<Violation>,
    pub verdicts: Vec<Verdict>,
    pub debt: Vec<DebtItem>,
    /// C4's query results, by predicate (spec.md:30: "All results → C11").
    /// Keyed by the built-in program's IDB predicates (`Reaches`,
    /// `PointsTo`, ...); empty for a function whose SSA build failed,
    /// since Datalog input comes from the fact extractor over SSA.
    #[serde(default)]
    pub derived_facts: BTreeMap<String, Vec<Tuple>>,
}

impl FunctionMetrics {
    pub fn debt_cost(&self) -> f64 {
        self.debt.iter().map(|d| d.cost).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub functions: Vec<FunctionMetrics>,
}

impl FileReport {
    pub fn violation_count(&self) -> usize {
        self.functions.iter().map(|f| f.violations.len()).sum()
    }

    pub fn debt_cost(&self) -> f64 {
        self.functions.iter().map(|f| f.debt_cost()).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    pub f: usize,
}

impl RatingDistribution {
    pub fn record(&mut self, rating: Rating) {
        match rating {
            Rating::A => self.a += 1,
            Rating::B => self.b += 1,
            Rating::C => self.c += 1,
            Rating::D => self.d += 1,
            Rating::F => self.f += 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectReport {
    pub files: Vec<FileReport>,
    pub avg_cc: f64,
    pub avg_mi: f64,
    pub health_score: f64,
    pub rating_distribution: RatingDistribution,
    pub worst_functions: Vec<String>,
    pub violations: Vec<Violation>,
    /// Paths that failed to complete analysis (spec §5: cancellation
    /// still yields a valid partial result).
    pub skipped_paths: Vec<String>,
}
