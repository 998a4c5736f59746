use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::params::LeverageParams;
use crate::analytics::summary::PerformanceSummary;

/// Parameters echoed at the top level of the report so a consumer can
/// reproduce or re-tune the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoedParameters {
    pub window_trading_days: usize,
    pub trading_days_per_year: u32,
    pub risk_free_rate_annual: f64,
    pub borrow_spread_annual: f64,
    pub fund_fee_annual: f64,
    pub fraction: f64,
    pub vol_ewma_lambda: f64,
}

impl From<&LeverageParams> for EchoedParameters {
    fn from(p: &LeverageParams) -> Self {
        Self {
            window_trading_days: p.window_trading_days,
            trading_days_per_year: p.trading_days_per_year,
            risk_free_rate_annual: p.risk_free_rate_annual,
            borrow_spread_annual: p.borrow_spread_annual,
            fund_fee_annual: p.fund_fee_annual,
            fraction: p.fraction,
            vol_ewma_lambda: p.vol_ewma_lambda,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub mu_excess_annual: f64,
    pub volatility_annual: f64,
    pub sharpe_ratio_annual: f64,
    pub kelly_leverage: f64,
    pub fractional_kelly: f64,
    pub cap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedLeverage {
    pub alpha: f64,
    pub vol_target_annual: f64,
    pub cap: f64,
    #[serde(rename = "L_kelly")]
    pub l_kelly: f64,
    #[serde(rename = "L_vol")]
    pub l_vol: f64,
    #[serde(rename = "L_blend")]
    pub l_blend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub downside_deviation_annual: f64,
    pub sortino_ratio_annual: f64,
    pub max_drawdown: f64,
    pub calmar_ratio: f64,
    pub es_95: f64,
    pub vol_of_vol: f64,
    pub beta_spx: f64,
    pub corr_spx: f64,
}

/// Point-in-time statistics for one day of the replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetricRecord {
    pub date: NaiveDate,
    pub price_close: f64,
    pub ffrate_daily: f64,
    pub realized_vol_annual: f64,
    pub ewma_vol_annual: f64,
    pub volatility_score: f64,
    pub mu_excess_annual: f64,
    pub kelly_leverage: f64,
    pub fractional_kelly: f64,
    #[serde(rename = "L_kelly")]
    pub l_kelly: f64,
    #[serde(rename = "L_vol")]
    pub l_vol: f64,
    #[serde(rename = "L_blend")]
    pub l_blend: f64,
    /// Drawdown of the window's wealth curve on this day.
    pub max_drawdown: f64,
    pub beta_spx: f64,
    pub corr_spx: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageReport {
    pub as_of: NaiveDate,
    pub symbol: String,
    #[serde(flatten)]
    pub parameters: EchoedParameters,
    #[serde(flatten)]
    pub aggregate: AggregateMetrics,
    pub suggested: SuggestedLeverage,
    pub risk: RiskMetrics,
    pub series: Vec<DailyMetricRecord>,
}

impl LeverageReport {
    /// True when every numeric field, including the series, is finite.
    pub fn is_finite(&self) -> bool {
        let a = &self.aggregate;
        let s = &self.suggested;
        let r = &self.risk;
        let head = [
            a.mu_excess_annual,
            a.volatility_annual,
            a.sharpe_ratio_annual,
            a.kelly_leverage,
            a.fractional_kelly,
            s.l_kelly,
            s.l_vol,
            s.l_blend,
            r.downside_deviation_annual,
            r.sortino_ratio_annual,
            r.max_drawdown,
            r.calmar_ratio,
            r.es_95,
            r.vol_of_vol,
            r.beta_spx,
            r.corr_spx,
        ];
        head.iter().all(|v| v.is_finite())
            && self.series.iter().all(|d| {
                [
                    d.price_close,
                    d.ffrate_daily,
                    d.realized_vol_annual,
                    d.ewma_vol_annual,
                    d.volatility_score,
                    d.mu_excess_annual,
                    d.kelly_leverage,
                    d.fractional_kelly,
                    d.l_kelly,
                    d.l_vol,
                    d.l_blend,
                    d.max_drawdown,
                    d.beta_spx,
                    d.corr_spx,
                ]
                .iter()
                .all(|v| v.is_finite())
            })
    }
}

/// Published envelope: recent-window summary on top, full report nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDocument {
    pub generated_at: String,
    pub last_updated: String,
    #[serde(flatten)]
    pub summary: PerformanceSummary,
    pub leverage: LeverageReport,
}
