//! Single-writer aggregation sink (spec §5: "the aggregator is the only
//! shared sink; its `addFile` operation must be serialized"). Callers
//! behind a worker pool must hold a lock (or route through a single
//! merge-stage thread) around `add_file`; this type itself is `&mut self`
//! only, it does not do its own locking.

use crate::features::aggregator::domain::{FileReport, ProjectReport, RatingDistribution};
use crate::features::maintainability::MaintainabilityIndex;

/// Violations-per-file is capped at this many before the health-score
/// penalty saturates at 1.0, mirroring the `min(CC, 40)/40` cap already in
/// the spec's formula (spec §4.10 does not give an explicit cap).
const VIOLATIONS_PER_FILE_CAP: f64 = 10.0;
const WORST_FUNCTIONS_TOP_K: usize = 10;

#[derive(Debug, Default)]
pub struct Aggregator {
    files: Vec<FileReport>,
    skipped_paths: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, report: FileReport) {
        tracing::debug!(path = %report.path, functions = report.functions.len(), "aggregated file");
        self.files.push(report);
    }

    pub fn mark_skipped(&mut self, path: impl Into<String>) {
        self.skipped_paths.push(path.into());
    }

    pub fn finalize(self) -> ProjectReport {
        let function_count: usize = self.files.iter().map(|f| f.functions.len()).sum();
        let (sum_cc, sum_mi) = self.files.iter().flat_map(|f| &f.functions).fold((0u64, 0.0), |(cc, mi), f| {
            (cc + f.cyclomatic as u64, mi + f.maintainability_index)
        });

        let avg_cc = if function_count == 0 { 0.0 } else { sum_cc as f64 / function_count as f64 };
        let avg_mi = if function_count == 0 { 0.0 } else { sum_mi / function_count as f64 };

        let mut rating_distribution = RatingDistribution::default();
        for function in self.files.iter().flat_map(|f| &f.functions) {
            rating_distribution.record(MaintainabilityIndex(function.maintainability_index).rating());
        }

        let total_violations: usize = self.files.iter().map(|f| f.violation_count()).sum();
        let file_count = self.files.len().max(1);
        let violations_per_file = total_violations as f64 / file_count as f64;
        let violation_penalty = (violations_per_file / VIOLATIONS_PER_FILE_CAP).min(1.0);

        let health_score =
            0.4 * (avg_mi / 100.0) + 0.3 * (1.0 - (avg_cc.min(40.0) / 40.0)) + 0.3 * (1.0 - violation_penalty);

        let mut worst: Vec<(&str, usize, f64)> = self
            .files
            .iter()
            .flat_map(|f| &f.functions)
            .map(|f| (f.function_id.as_str(), f.violations.len() + f.verdicts.iter().filter(|v| !v.is_safe).count(), f.debt_cost()))
            .collect();
        worst.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal)));
        let worst_functions = worst.into_iter().take(WORST_FUNCTIONS_TOP_K).map(|(id, _, _)| id.to_string()).collect();

        let mut violations: Vec<_> = self
            .files
            .iter()
            .flat_map(|f| f.functions.iter())
            .flat_map(|f| f.violations.iter().cloned())
            .collect();
        violations.sort_by(|a, b| {
            a.span.start.line.cmp(&b.span.start.line).then(a.span.start.column.cmp(&b.span.start.column))
        });

        ProjectReport {
            files: self.files,
            avg_cc,
            avg_mi,
            health_score: (health_score * 100.0).clamp(0.0, 100.0),
            rating_distribution,
            worst_functions,
            violations,
            skipped_paths: self.skipped_paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::aggregator::domain::FunctionMetrics;

    fn func(id: &str, cc: u32, mi: f64) -> FunctionMetrics {
        FunctionMetrics {
            function_id: id.into(),
            cyclomatic: cc,
            cognitive: 0,
            maintainability_index: mi,
            lines_of_code: 10,
            violations: Vec::new(),
            verdicts: Vec::new(),
            debt: Vec::new(),
            derived_facts: Default::default(),
        }
    }

    #[test]
    fn empty_project_has_zeroed_metrics() {
        let report = Aggregator::new().finalize();
        assert_eq!(report.avg_cc, 0.0);
        assert_eq!(report.avg_mi, 0.0);
    }

    #[test]
    fn averages_across_functions_and_files() {
        let mut agg = Aggregator::new();
        agg.add_file(FileReport { path: "a.ts".into(), functions: vec![func("a#f", 10, 80.0)] });
        agg.add_file(FileReport { path: "b.ts".into(), functions: vec![func("b#f", 20, 60.0)] });
        let report = agg.finalize();
        assert_eq!(report.avg_cc, 15.0);
        assert_eq!(report.avg_mi, 70.0);
    }

    #[test]
    fn skipped_files_are_preserved_for_partial_results() {
        let mut agg = Aggregator::new();
        agg.mark_skipped("broken.ts");
        let report = agg.finalize();
        assert_eq!(report.skipped_paths, vec!["broken.ts".to_string()]);
    }
}
