use serde::{Deserialize, Serialize};

use crate::analytics::params::LeverageParams;
use crate::stats::{max_drawdown, mean, ratio_or_zero, sample_stdev};

/// Headline figures over the most recent `summary_window_days` returns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
}

impl PerformanceSummary {
    pub fn compute(returns: &[f64], params: &LeverageParams) -> Self {
        let start = returns.len().saturating_sub(params.summary_window_days);
        let recent = &returns[start..];
        if recent.is_empty() {
            return Self::default();
        }

        let gains: f64 = recent.iter().filter(|r| **r > 0.0).sum();
        let losses: f64 = recent.iter().filter(|r| **r < 0.0).sum();
        let wins = recent.iter().filter(|r| **r > 0.0).count();
        let has_losses = recent.iter().any(|r| *r < 0.0);

        let win_rate = wins as f64 / recent.len() as f64;
        let profit_factor = if has_losses && losses != 0.0 {
            gains.abs() / losses.abs()
        } else {
            0.0
        };

        // Excess over the risk-free rate only; no fund fee.
        let mu = mean(recent) * params.annualization();
        let sigma = sample_stdev(recent) * params.sqrt_annualization();
        let sharpe_ratio = ratio_or_zero(mu - params.risk_free_rate_annual, sigma);

        Self {
            sharpe_ratio,
            max_drawdown: max_drawdown(recent),
            win_rate,
            profit_factor,
        }
    }
}
