use crate::features::aggregator::domain::{FileReport, ProjectReport};
use crate::features::aggregator::infrastructure::Aggregator;

/// Thin application-layer handle around the single-writer [`Aggregator`]
/// (spec §5). The pipeline owns one of these per run and feeds it
/// `FileReport`s as each file finishes, in whatever order they complete.
#[derive(Debug, Default)]
pub struct AggregationSession {
    aggregator: Aggregator,
}

impl AggregationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, report: FileReport) {
        self.aggregator.add_file(report);
    }

    pub fn mark_skipped(&mut self, path: impl Into<String>) {
        self.aggregator.mark_skipped(path);
    }

    pub fn finalize(self) -> ProjectReport {
        self.aggregator.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_delegates_to_aggregator() {
        let mut session = AggregationSession::new();
        session.mark_skipped("x.ts");
        let report = session.finalize();
        assert_eq!(report.skipped_paths, vec!["x.ts".to_string()]);
    }
}
