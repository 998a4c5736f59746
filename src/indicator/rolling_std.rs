use crate::stats::sample_stdev;

/// Sample standard deviation over a fixed trailing window, backed by a ring buffer.
///
/// Only full windows produce a value.
#[derive(Debug, Clone)]
pub struct RollingStd {
    period: usize,
    buffer: Vec<f64>,
    head: usize,
    count: usize,
}

impl RollingStd {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "rolling window must be > 0");
        Self {
            period,
            buffer: vec![0.0; period],
            head: 0,
            count: 0,
        }
    }

    /// Push a new value, return the window stdev once the window is full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.period;
        if self.count < self.period {
            self.count += 1;
        }
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        // Chronological order keeps the summation identical to a slice-based stdev.
        let ordered: Vec<f64> = self.buffer[self.head..]
            .iter()
            .chain(&self.buffer[..self.head])
            .copied()
            .collect();
        Some(sample_stdev(&ordered))
    }

    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }
}

/// Annualized realized volatility for every full trailing window of `period` returns.
pub fn rolling_vol_series(returns: &[f64], period: usize, trading_days_per_year: f64) -> Vec<f64> {
    let mut rolling = RollingStd::new(period);
    let scale = trading_days_per_year.sqrt();
    returns
        .iter()
        .filter_map(|&r| rolling.push(r).map(|sd| sd * scale))
        .collect()
}
