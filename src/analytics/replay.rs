use crate::analytics::leverage::LeverageEstimate;
use crate::analytics::params::LeverageParams;
use crate::error::AnalyticsResult;
use crate::indicator::ewma_vol_scan;
use crate::model::series::ReturnSeries;
use crate::parallel::map_indices;
use crate::report::DailyMetricRecord;
use crate::stats::{beta, correlation, current_drawdown, mean, sample_stdev};

/// Weight of realized vs EWMA volatility in the per-day volatility score.
const REALIZED_WEIGHT: f64 = 0.5;

/// Point-in-time replay of the leverage statistics over the whole history.
///
/// The EWMA variance is the only sequential state and is produced up front by
/// a scan. Every other per-day figure depends only on the immutable trailing
/// window ending that day, so days are mapped independently and merged back
/// by index.
pub(crate) struct RollingReplay<'a> {
    series: &'a ReturnSeries,
    params: &'a LeverageParams,
    returns: Vec<f64>,
    benchmark: Option<Vec<f64>>,
}

impl<'a> RollingReplay<'a> {
    /// `params` must already be validated; see [`replay_series`].
    pub(crate) fn new(series: &'a ReturnSeries, params: &'a LeverageParams) -> Self {
        Self {
            series,
            params,
            returns: series.returns(),
            benchmark: series.benchmark_returns(),
        }
    }

    pub fn run(&self) -> Vec<DailyMetricRecord> {
        let ewma_vol = ewma_vol_scan(
            &self.returns,
            self.params.vol_ewma_lambda,
            self.params.annualization(),
        );
        let records = map_indices(
            self.returns.len(),
            |i| self.record_at(i, ewma_vol[i]),
            self.params.force_sequential,
        );
        tracing::debug!(
            days = records.len(),
            window = self.params.window_trading_days,
            benchmark = self.benchmark.is_some(),
            "Replayed daily metrics"
        );
        records
    }

    /// Trailing window bounds `[start, i]`, truncated at the start of history.
    fn window_start(&self, i: usize) -> usize {
        (i + 1).saturating_sub(self.params.window_trading_days)
    }

    fn record_at(&self, i: usize, ewma_vol_annual: f64) -> DailyMetricRecord {
        let p = self.params;
        let point = &self.series.points()[i];
        let start = self.window_start(i);
        let window = &self.returns[start..=i];

        // sample_stdev is zero for a single-observation window.
        let realized_vol_annual = sample_stdev(window) * p.sqrt_annualization();
        let variance_annual = realized_vol_annual * realized_vol_annual;
        let volatility_score =
            REALIZED_WEIGHT * realized_vol_annual + (1.0 - REALIZED_WEIGHT) * ewma_vol_annual;

        let mu_excess_annual = mean(window) * p.annualization() - p.hurdle_annual();
        let lev = LeverageEstimate::compute(mu_excess_annual, variance_annual, volatility_score, p);

        let (beta_spx, corr_spx) = match &self.benchmark {
            Some(bench) if window.len() > 1 => {
                let bench_window = &bench[start..=i];
                (beta(window, bench_window), correlation(window, bench_window))
            }
            _ => (0.0, 0.0),
        };

        DailyMetricRecord {
            date: point.date,
            price_close: point.price_close,
            ffrate_daily: point.risk_free_rate,
            realized_vol_annual,
            ewma_vol_annual,
            volatility_score,
            mu_excess_annual,
            kelly_leverage: lev.kelly,
            fractional_kelly: lev.fractional_kelly,
            l_kelly: lev.kelly,
            l_vol: lev.vol_target,
            l_blend: lev.blend,
            max_drawdown: current_drawdown(window),
            beta_spx,
            corr_spx,
        }
    }
}

/// Validates `params` before replaying, so a bad EWMA decay surfaces as a
/// configuration error.
pub fn replay_series(
    series: &ReturnSeries,
    params: &LeverageParams,
) -> AnalyticsResult<Vec<DailyMetricRecord>> {
    params.validate()?;
    Ok(RollingReplay::new(series, params).run())
}
