use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Assumptions for one analytics run. Passed explicitly so concurrent runs
/// with different assumptions never share state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeverageParams {
    pub window_trading_days: usize,
    pub risk_free_rate_annual: f64,
    pub borrow_spread_annual: f64,
    pub fund_fee_annual: f64,
    pub cap: f64,
    pub fraction: f64,
    pub trading_days_per_year: u32,
    pub vol_ewma_lambda: f64,
    pub vol_target_annual: f64,
    pub blend_alpha: f64,
    pub summary_window_days: usize,
    /// Runs the per-day replay on the calling thread even with `parallel` enabled.
    #[serde(skip)]
    pub force_sequential: bool,
}

impl Default for LeverageParams {
    fn default() -> Self {
        Self {
            window_trading_days: 252,
            risk_free_rate_annual: 0.045,
            borrow_spread_annual: 0.0,
            fund_fee_annual: 0.0,
            cap: 3.0,
            fraction: 0.5,
            trading_days_per_year: 252,
            vol_ewma_lambda: 0.94,
            vol_target_annual: 0.20,
            blend_alpha: 0.5,
            summary_window_days: 252,
            force_sequential: false,
        }
    }
}

impl LeverageParams {
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.window_trading_days == 0 {
            return Err(invalid("window_trading_days must be > 0"));
        }
        if self.trading_days_per_year == 0 {
            return Err(invalid("trading_days_per_year must be > 0"));
        }
        if self.summary_window_days == 0 {
            return Err(invalid("summary_window_days must be > 0"));
        }
        for (name, value) in [
            ("risk_free_rate_annual", self.risk_free_rate_annual),
            ("borrow_spread_annual", self.borrow_spread_annual),
            ("fund_fee_annual", self.fund_fee_annual),
            ("cap", self.cap),
            ("fraction", self.fraction),
            ("vol_ewma_lambda", self.vol_ewma_lambda),
            ("vol_target_annual", self.vol_target_annual),
            ("blend_alpha", self.blend_alpha),
        ] {
            if !value.is_finite() {
                return Err(invalid(&format!("{name} must be finite, got {value}")));
            }
        }
        if self.cap <= 0.0 {
            return Err(invalid(&format!("cap must be > 0, got {}", self.cap)));
        }
        if !(0.0..1.0).contains(&self.vol_ewma_lambda) {
            return Err(invalid(&format!(
                "vol_ewma_lambda must be in [0, 1), got {}",
                self.vol_ewma_lambda
            )));
        }

        if !(0.0..=1.0).contains(&self.fraction) {
            tracing::warn!(fraction = self.fraction, "Kelly fraction outside [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.blend_alpha) {
            tracing::warn!(blend_alpha = self.blend_alpha, "Blend alpha outside [0, 1]");
        }
        Ok(())
    }

    pub fn annualization(&self) -> f64 {
        self.trading_days_per_year as f64
    }

    pub fn sqrt_annualization(&self) -> f64 {
        self.annualization().sqrt()
    }

    /// Annual drag deducted from expected return.
    pub fn hurdle_annual(&self) -> f64 {
        self.risk_free_rate_annual + self.fund_fee_annual
    }
}

fn invalid(msg: &str) -> AnalyticsError {
    AnalyticsError::Configuration(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LeverageParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_each_invalid_domain() {
        let cases = [
            LeverageParams {
                window_trading_days: 0,
                ..Default::default()
            },
            LeverageParams {
                cap: 0.0,
                ..Default::default()
            },
            LeverageParams {
                cap: -1.0,
                ..Default::default()
            },
            LeverageParams {
                trading_days_per_year: 0,
                ..Default::default()
            },
            LeverageParams {
                vol_ewma_lambda: 1.0,
                ..Default::default()
            },
            LeverageParams {
                vol_ewma_lambda: -0.1,
                ..Default::default()
            },
            LeverageParams {
                vol_target_annual: f64::NAN,
                ..Default::default()
            },
            LeverageParams {
                summary_window_days: 0,
                ..Default::default()
            },
        ];
        for params in cases {
            assert!(
                matches!(params.validate(), Err(AnalyticsError::Configuration(_))),
                "expected rejection for {:?}",
                params
            );
        }
    }

    #[test]
    fn out_of_range_fraction_is_accepted() {
        let params = LeverageParams {
            fraction: 1.5,
            blend_alpha: -0.2,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn lambda_zero_is_allowed() {
        let params = LeverageParams {
            vol_ewma_lambda: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
