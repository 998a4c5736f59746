use crate::analytics::params::LeverageParams;
use crate::stats::ratio_or_zero;

/// Kelly, vol-target and blended leverage for one set of return estimates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LeverageEstimate {
    pub kelly: f64,
    pub fractional_kelly: f64,
    pub vol_target: f64,
    pub blend: f64,
}

impl LeverageEstimate {
    /// `sigma_annual` drives the vol-target leg; the replay passes its blended
    /// volatility score here instead of the window stdev.
    pub fn compute(
        mu_excess_annual: f64,
        variance_annual: f64,
        sigma_annual: f64,
        params: &LeverageParams,
    ) -> Self {
        let kelly = kelly_leverage(mu_excess_annual, variance_annual);
        let vol_target = ratio_or_zero(params.vol_target_annual, sigma_annual);
        Self {
            kelly,
            fractional_kelly: params.cap.min(params.fraction * kelly),
            vol_target,
            blend: blend_leverage(kelly, vol_target, params),
        }
    }
}

/// Growth-optimal leverage `mu / sigma^2`, zero without variance.
pub fn kelly_leverage(mu_excess_annual: f64, variance_annual: f64) -> f64 {
    ratio_or_zero(mu_excess_annual, variance_annual)
}

pub fn blend_leverage(kelly: f64, vol_target: f64, params: &LeverageParams) -> f64 {
    let a = params.blend_alpha;
    params.cap.min(a * kelly + (1.0 - a) * vol_target)
}
