use crate::analytics::params::LeverageParams;
use crate::indicator::rolling_vol_series;
use crate::stats::{
    beta, correlation, max_drawdown, mean, percentile_linear, ratio_or_zero, sample_stdev,
};

/// Trailing window used for the realized-vol series behind `vol_of_vol`.
pub const VOL_OF_VOL_WINDOW: usize = 21;

const TAIL_QUANTILE: f64 = 0.05;

/// Whole-history statistics over the full return series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateStats {
    pub mu_annual: f64,
    pub mu_excess_annual: f64,
    pub sigma_annual: f64,
    pub variance_annual: f64,
    pub sharpe_annual: f64,
    pub downside_deviation_annual: f64,
    pub sortino_annual: f64,
    pub max_drawdown: f64,
    pub calmar: f64,
    pub var_95: f64,
    pub es_95: f64,
    pub vol_of_vol: f64,
    pub beta: f64,
    pub correlation: f64,
}

impl AggregateStats {
    pub fn compute(returns: &[f64], benchmark: Option<&[f64]>, params: &LeverageParams) -> Self {
        let t = params.annualization();
        let sqrt_t = params.sqrt_annualization();

        let mu_annual = mean(returns) * t;
        let sigma_annual = sample_stdev(returns) * sqrt_t;
        let variance_annual = sigma_annual * sigma_annual;
        let mu_excess_annual = mu_annual - params.hurdle_annual();
        let sharpe_annual = ratio_or_zero(mu_excess_annual, sigma_annual);

        let downside_deviation_annual = downside_deviation(returns) * sqrt_t;
        let sortino_annual = ratio_or_zero(mu_excess_annual, downside_deviation_annual);

        let max_drawdown = max_drawdown(returns);
        let calmar = if max_drawdown != 0.0 {
            mu_annual / max_drawdown.abs()
        } else {
            0.0
        };

        let (var_95, es_95) = tail_risk(returns);

        let rolling_vol = rolling_vol_series(returns, VOL_OF_VOL_WINDOW, t);
        let vol_of_vol = sample_stdev(&rolling_vol);

        let (beta, correlation) = match benchmark {
            Some(b) => (beta(returns, b), correlation(returns, b)),
            None => (0.0, 0.0),
        };

        Self {
            mu_annual,
            mu_excess_annual,
            sigma_annual,
            variance_annual,
            sharpe_annual,
            downside_deviation_annual,
            sortino_annual,
            max_drawdown,
            calmar,
            var_95,
            es_95,
            vol_of_vol,
            beta,
            correlation,
        }
    }
}

/// Root-mean-square of the negative returns, daily units.
pub fn downside_deviation(returns: &[f64]) -> f64 {
    let squares: Vec<f64> = returns
        .iter()
        .filter(|r| **r < 0.0)
        .map(|r| r * r)
        .collect();
    if squares.is_empty() {
        0.0
    } else {
        mean(&squares).sqrt()
    }
}

/// Historical 95% VaR (5th percentile) and the mean of returns at or below it.
pub fn tail_risk(returns: &[f64]) -> (f64, f64) {
    if returns.is_empty() {
        return (0.0, 0.0);
    }
    let var_95 = percentile_linear(returns, TAIL_QUANTILE);
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= var_95).collect();
    // The minimum is always at or below an interpolated 5th percentile.
    (var_95, mean(&tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downside_deviation_ignores_gains() {
        let dd = downside_deviation(&[0.05, -0.03, 0.02, -0.04]);
        assert!((dd - (0.0025f64 / 2.0 * 1.0).sqrt()).abs() < 1e-12);
        assert_eq!(downside_deviation(&[0.01, 0.0]), 0.0);
    }

    #[test]
    fn expected_shortfall_averages_the_tail() {
        let returns: Vec<f64> = (1..=20).map(|i| i as f64 * -0.001).collect();
        let (var, es) = tail_risk(&returns);
        // sorted: -0.020 .. -0.001, pos = 0.95 -> -0.020 + 0.95 * 0.001
        assert!((var - (-0.01905)).abs() < 1e-12);
        assert!((es - (-0.020)).abs() < 1e-12);
    }

    #[test]
    fn vol_of_vol_needs_two_full_windows() {
        let params = LeverageParams::default();
        let short: Vec<f64> = (0..21).map(|i| if i % 2 == 0 { 0.01 } else { -0.01 }).collect();
        assert_eq!(AggregateStats::compute(&short, None, &params).vol_of_vol, 0.0);

        let long: Vec<f64> = (0..60)
            .map(|i| ((i * 13 % 17) as f64 - 8.0) * 0.002)
            .collect();
        assert!(AggregateStats::compute(&long, None, &params).vol_of_vol > 0.0);
    }

    #[test]
    fn calmar_uses_gross_annual_return() {
        let params = LeverageParams {
            risk_free_rate_annual: 0.05,
            ..Default::default()
        };
        let returns = [0.01, -0.02, 0.015, 0.005];
        let stats = AggregateStats::compute(&returns, None, &params);
        assert!(stats.max_drawdown < 0.0);
        let expected = stats.mu_annual / stats.max_drawdown.abs();
        assert!((stats.calmar - expected).abs() < 1e-12);
    }
}
