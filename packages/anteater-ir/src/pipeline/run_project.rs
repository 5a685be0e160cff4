//! Project-wide orchestration: sequential by default, optionally
//! rayon-parallel across files, feeding one single-writer aggregator
//! (spec §5).

use crate::config::RunConfig;
use crate::features::aggregator::{AggregationSession, ProjectReport};
use crate::features::style_rules::RuleRegistry;
use crate::pipeline::analyze_file::{analyze_file, FileOutcome, SkipNote};
use crate::shared::ast::{AstVisitor, NodeId};
use rayon::prelude::*;

/// One file queued for analysis: its path, its AST, and the root node to
/// walk for functions.
pub struct FileInput<'a, V: AstVisitor> {
    pub path: String,
    pub ast: &'a V,
    pub root: NodeId,
}

/// Cooperative cancellation, checked at file boundaries (spec §5:
/// "cancellable at coarse boundaries... between files"). Returning `true`
/// stops picking up new files; files already in flight still finish.
pub trait CancelSignal: Sync {
    fn is_cancelled(&self) -> bool;
}

impl CancelSignal for std::sync::atomic::AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(std::sync::atomic::Ordering::Relaxed)
    }
}

/// Runs every file in `files` and folds the results into one
/// `ProjectReport`. Sequential by default; pass `parallel: true` to
/// analyze files across a rayon worker pool first and merge afterward —
/// safe because per-file analyses share no mutable state. Either way the
/// aggregator itself is fed on the calling thread, one file at a time, so
/// `addFile` is never called concurrently (spec §5).
///
/// Files are reported in the order given; callers sort by path first if
/// they want the deterministic cross-file ordering spec §5 asks for.
pub fn run_project<V: AstVisitor + Sync>(
    files: &[FileInput<'_, V>],
    registry: &RuleRegistry,
    config: &RunConfig,
    parallel: bool,
    cancel: Option<&(dyn CancelSignal + Sync)>,
) -> ProjectReport {
    if parallel {
        run_parallel(files, registry, config, cancel)
    } else {
        run_sequential(files, registry, config, cancel)
    }
}

fn run_sequential<V: AstVisitor>(
    files: &[FileInput<'_, V>],
    registry: &RuleRegistry,
    config: &RunConfig,
    cancel: Option<&(dyn CancelSignal + Sync)>,
) -> ProjectReport {
    let mut session = AggregationSession::new();
    for file in files {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            session.mark_skipped(file.path.clone());
            continue;
        }
        let FileOutcome { report, skipped } = analyze_file(file.ast, file.path.clone(), file.root, registry, config);
        log_skips(&skipped);
        session.add_file(report);
    }
    session.finalize()
}

fn run_parallel<V: AstVisitor + Sync>(
    files: &[FileInput<'_, V>],
    registry: &RuleRegistry,
    config: &RunConfig,
    cancel: Option<&(dyn CancelSignal + Sync)>,
) -> ProjectReport {
    let outcomes: Vec<Option<FileOutcome>> = files
        .par_iter()
        .map(|file| {
            if cancel.is_some_and(|c| c.is_cancelled()) {
                return None;
            }
            Some(analyze_file(file.ast, file.path.clone(), file.root, registry, config))
        })
        .collect();

    let mut session = AggregationSession::new();
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Some(FileOutcome { report, skipped }) => {
                log_skips(&skipped);
                session.add_file(report);
            }
            None => session.mark_skipped(file.path.clone()),
        }
    }
    session.finalize()
}

fn log_skips(skipped: &[SkipNote]) {
    for note in skipped {
        tracing::info!(path = %note.path, function = %note.function_id, reason = %note.reason, "function skipped");
    }
}
