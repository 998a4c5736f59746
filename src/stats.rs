//! Numeric primitives shared by the aggregate and replay computations.
//!
//! Every helper returns a finite value for degenerate input (empty slices,
//! single observations, zero variance) instead of NaN.

use std::cmp::Ordering;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased (n-1) variance. `None` when fewer than two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(ss / (values.len() - 1) as f64)
}

pub fn sample_stdev(values: &[f64]) -> f64 {
    sample_variance(values).map(f64::sqrt).unwrap_or(0.0)
}

/// Unbiased (n-1) covariance over the common prefix of both slices.
pub fn sample_covariance(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let (ma, mb) = (mean(a), mean(b));
    let s: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    Some(s / (n - 1) as f64)
}

/// `cov(a, b) / var(b)`, zero when the benchmark does not move.
pub fn beta(a: &[f64], b: &[f64]) -> f64 {
    match (sample_covariance(a, b), sample_variance(b)) {
        (Some(cov), Some(var_b)) if var_b > 0.0 => cov / var_b,
        _ => 0.0,
    }
}

/// Pearson correlation, zero when either side has no variance.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);
    match (
        sample_covariance(a, b),
        sample_variance(a),
        sample_variance(b),
    ) {
        (Some(cov), Some(var_a), Some(var_b)) if var_a > 0.0 && var_b > 0.0 => {
            (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Percentile with linear interpolation between order statistics.
/// `q` is a fraction in `[0, 1]`.
pub fn percentile_linear(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let pos = q.clamp(0.0, 1.0) * (sorted.len() as f64 - 1.0);
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;
    if idx + 1 >= sorted.len() {
        sorted[idx]
    } else {
        sorted[idx] + (sorted[idx + 1] - sorted[idx]) * frac
    }
}

/// Drawdown path of the wealth curve `W_t = prod(1 + r_i)`.
///
/// Returns are compounded as simple returns even though they are log returns;
/// every drawdown-derived figure depends on this convention.
pub fn drawdown_curve(returns: &[f64]) -> Vec<f64> {
    let mut wealth = 1.0;
    let mut peak = f64::NEG_INFINITY;
    returns
        .iter()
        .map(|r| {
            wealth *= 1.0 + r;
            peak = peak.max(wealth);
            if peak != 0.0 {
                (wealth - peak) / peak
            } else {
                0.0
            }
        })
        .collect()
}

/// Deepest drawdown, `<= 0`.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    drawdown_curve(returns).into_iter().fold(0.0, f64::min)
}

/// Drawdown on the last day of the slice relative to its running peak.
pub fn current_drawdown(returns: &[f64]) -> f64 {
    drawdown_curve(returns).last().copied().unwrap_or(0.0)
}

pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
