pub mod aggregate;
pub mod engine;
pub mod leverage;
pub mod params;
pub mod replay;
pub mod summary;

pub use aggregate::AggregateStats;
pub use engine::LeverageEngine;
pub use leverage::LeverageEstimate;
pub use params::LeverageParams;
pub use replay::replay_series;
pub use summary::PerformanceSummary;
