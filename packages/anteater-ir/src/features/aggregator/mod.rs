//! C11: Aggregator — per-function, per-file and project-wide roll-ups,
//! health score and rating distribution (spec §4.10).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::AggregationSession;
pub use domain::{FileReport, FunctionMetrics, ProjectReport, RatingDistribution};
pub use infrastructure::Aggregator;
