//! Point-in-time leverage analytics over daily price history.
//!
//! Aligns price, risk-free and optional benchmark series, derives log
//! returns, and produces whole-history risk statistics, a Kelly /
//! vol-target blended leverage suggestion, and a day-by-day replay of the
//! same figures over a trailing window.

pub mod analytics;
pub mod config;
pub mod error;
pub mod indicator;
pub mod model;
pub mod parallel;
pub mod report;
pub mod runner;
pub mod stats;

pub use analytics::{LeverageEngine, LeverageParams};
pub use error::{AnalyticsError, AnalyticsResult};
pub use model::series::{MarketInputs, Observation};
pub use report::{DailyMetricRecord, LeverageReport, MetricsDocument};
