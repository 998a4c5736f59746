use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::analytics::LeverageEngine;
use crate::error::AnalyticsResult;
use crate::model::series::MarketInputs;
use crate::report::MetricsDocument;

pub fn read_inputs(path: &Path) -> AnalyticsResult<MarketInputs> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_document(path: &Path, doc: &MetricsDocument) -> AnalyticsResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(doc)?)?;
    Ok(())
}

/// Run the blocking engine off the async runtime under a deadline.
///
/// A run that misses the deadline yields an error and no partial document.
pub async fn run_with_timeout(
    engine: LeverageEngine,
    inputs: MarketInputs,
    timeout: Duration,
) -> Result<MetricsDocument> {
    let task = tokio::task::spawn_blocking(move || engine.run_document(&inputs, Utc::now()));
    let joined = tokio::time::timeout(timeout, task)
        .await
        .with_context(|| format!("leverage run exceeded {:?}", timeout))?;
    let doc = joined
        .context("leverage task panicked")?
        .context("leverage run failed")?;
    Ok(doc)
}
