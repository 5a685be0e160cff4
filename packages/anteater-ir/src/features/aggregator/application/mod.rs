mod aggregate_project;

pub use aggregate_project::AggregationSession;
