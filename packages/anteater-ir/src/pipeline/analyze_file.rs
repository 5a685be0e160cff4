//! Per-file orchestration: discover functions, analyze each, and fold the
//! outcomes into one `FileReport` plus a list of skip notes (spec §7).

use crate::config::RunConfig;
use crate::features::aggregator::FileReport;
use crate::features::style_rules::RuleRegistry;
use crate::pipeline::analyze_function::{analyze_function, FunctionOutcome};
use crate::pipeline::discover::find_functions;
use crate::shared::ast::{AstVisitor, NodeId};

/// A function (or file) that could not be fully analyzed, kept for the
/// report's "skipped" section (spec §7).
pub struct SkipNote {
    pub path: String,
    pub function_id: String,
    pub reason: String,
}

pub struct FileOutcome {
    pub report: FileReport,
    pub skipped: Vec<SkipNote>,
}

/// Analyzes every function found in one file. A per-function failure does
/// not abort the file: it is recorded in `skipped` and the rest continue
/// (spec §5, §7).
pub fn analyze_file<V: AstVisitor>(
    ast: &V,
    path: impl Into<String>,
    root: NodeId,
    registry: &RuleRegistry,
    config: &RunConfig,
) -> FileOutcome {
    let path = path.into();
    let functions = find_functions(ast, root);

    let mut metrics = Vec::with_capacity(functions.len());
    let mut skipped = Vec::new();

    for function in &functions {
        match analyze_function(ast, function, registry, config) {
            FunctionOutcome::Analyzed(m) => metrics.push(m),
            FunctionOutcome::Skipped { function_id, reason } => {
                skipped.push(SkipNote { path: path.clone(), function_id, reason });
            }
        }
    }

    FileOutcome {
        report: FileReport { path, functions: metrics },
        skipped,
    }
}
