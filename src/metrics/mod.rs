pub mod confidence;
pub mod team_stats;

pub use confidence::{standard_error, Confidence, MetricSummary};
pub use team_stats::TeamStats;
