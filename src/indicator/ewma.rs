/// Exponentially weighted variance of returns, RiskMetrics style.
///
/// The first observation seeds the state with `r_0^2`; every later one applies
/// `var = lambda * var + (1 - lambda) * r^2`.
#[derive(Debug, Clone)]
pub struct EwmaVariance {
    lambda: f64,
    var: Option<f64>,
}

impl EwmaVariance {
    pub fn new(lambda: f64) -> Self {
        assert!(
            (0.0..1.0).contains(&lambda),
            "EWMA lambda must be in [0, 1)"
        );
        Self { lambda, var: None }
    }

    /// Push a new return, return the updated variance.
    pub fn push(&mut self, ret: f64) -> f64 {
        let sq = ret * ret;
        let next = match self.var {
            Some(prev) => self.lambda * prev + (1.0 - self.lambda) * sq,
            None => sq,
        };
        self.var = Some(next);
        next
    }

    pub fn is_ready(&self) -> bool {
        self.var.is_some()
    }
}

/// Annualized EWMA volatility for every return, in order.
pub fn ewma_vol_scan(returns: &[f64], lambda: f64, trading_days_per_year: f64) -> Vec<f64> {
    let mut ewma = EwmaVariance::new(lambda);
    returns
        .iter()
        .map(|&r| (ewma.push(r) * trading_days_per_year).sqrt())
        .collect()
}
