use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::analytics::aggregate::AggregateStats;
use crate::analytics::leverage::LeverageEstimate;
use crate::analytics::params::LeverageParams;
use crate::analytics::replay::RollingReplay;
use crate::analytics::summary::PerformanceSummary;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::model::series::{AlignedSeries, MarketInputs, ReturnSeries};
use crate::report::{
    AggregateMetrics, DailyMetricRecord, EchoedParameters, LeverageReport, MetricsDocument,
    RiskMetrics, SuggestedLeverage,
};

/// Stateless leverage calculator. Holds only the validated parameters; every
/// call to [`LeverageEngine::run`] is independent.
#[derive(Debug, Clone)]
pub struct LeverageEngine {
    params: LeverageParams,
}

impl LeverageEngine {
    pub fn new(params: LeverageParams) -> AnalyticsResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn run(&self, inputs: &MarketInputs) -> AnalyticsResult<LeverageReport> {
        let aligned = AlignedSeries::from_inputs(inputs)?;
        let returns = aligned.log_returns();
        self.report_from_returns(&inputs.symbol, &returns)
    }

    /// Full published document: recent summary plus the nested report.
    pub fn run_document(
        &self,
        inputs: &MarketInputs,
        now: DateTime<Utc>,
    ) -> AnalyticsResult<MetricsDocument> {
        let aligned = AlignedSeries::from_inputs(inputs)?;
        let returns = aligned.log_returns();
        let leverage = self.report_from_returns(&inputs.symbol, &returns)?;
        let summary = PerformanceSummary::compute(&returns.returns(), &self.params);
        Ok(MetricsDocument {
            generated_at: now.format("%Y-%m-%d %H:%M:%SZ").to_string(),
            last_updated: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            summary,
            leverage,
        })
    }

    pub fn report_from_returns(
        &self,
        symbol: &str,
        returns: &ReturnSeries,
    ) -> AnalyticsResult<LeverageReport> {
        let as_of = returns
            .last_date()
            .ok_or_else(|| AnalyticsError::Data("return series is empty".to_string()))?;
        let p = &self.params;

        let r = returns.returns();
        let bench = returns.benchmark_returns();
        let stats = AggregateStats::compute(&r, bench.as_deref(), p);
        let lev = LeverageEstimate::compute(
            stats.mu_excess_annual,
            stats.variance_annual,
            stats.sigma_annual,
            p,
        );
        let series = RollingReplay::new(returns, p).run();

        tracing::info!(
            symbol = %symbol,
            %as_of,
            days = series.len(),
            sharpe = stats.sharpe_annual,
            l_kelly = lev.kelly,
            l_blend = lev.blend,
            "Computed leverage report"
        );

        Ok(assemble(symbol, as_of, p, &stats, &lev, series))
    }
}

/// Packages already-computed blocks; no recomputation.
fn assemble(
    symbol: &str,
    as_of: NaiveDate,
    p: &LeverageParams,
    stats: &AggregateStats,
    lev: &LeverageEstimate,
    series: Vec<DailyMetricRecord>,
) -> LeverageReport {
    LeverageReport {
        as_of,
        symbol: symbol.to_string(),
        parameters: EchoedParameters::from(p),
        aggregate: AggregateMetrics {
            mu_excess_annual: stats.mu_excess_annual,
            volatility_annual: stats.sigma_annual,
            sharpe_ratio_annual: stats.sharpe_annual,
            kelly_leverage: lev.kelly,
            fractional_kelly: lev.fractional_kelly,
            cap: p.cap,
        },
        suggested: SuggestedLeverage {
            alpha: p.blend_alpha,
            vol_target_annual: p.vol_target_annual,
            cap: p.cap,
            l_kelly: lev.kelly,
            l_vol: lev.vol_target,
            l_blend: lev.blend,
        },
        risk: RiskMetrics {
            downside_deviation_annual: stats.downside_deviation_annual,
            sortino_ratio_annual: stats.sortino_annual,
            max_drawdown: stats.max_drawdown,
            calmar_ratio: stats.calmar,
            es_95: stats.es_95,
            vol_of_vol: stats.vol_of_vol,
            beta_spx: stats.beta,
            corr_spx: stats.correlation,
        },
        series,
    }
}
