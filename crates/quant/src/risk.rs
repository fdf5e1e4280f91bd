//! Portfolio risk metrics.
//!
//! Both metrics operate on a holding-value time series recorded in
//! chronological order.

use crate::stats;

/// Sharpe ratio of a series of period returns.
///
/// Mean return divided by the sample standard deviation of returns, with
/// no annualization. Undefined (`None`) for fewer than two observations
/// or zero variance.
pub fn sharpe_ratio(returns: &[f64]) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let mean_return = stats::mean(returns)?;
    let std = stats::sample_std_dev(returns)?;
    if std == 0.0 {
        return None;
    }

    Some(mean_return / std)
}

/// Maximum drawdown of a value series, as an absolute decline.
///
/// The largest `running_max - value` over the series; 0 when the series
/// is empty or monotonically non-decreasing.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut max_dd: f64 = 0.0;
    let mut peak = f64::NEG_INFINITY;

    for &value in values {
        if value > peak {
            peak = value;
        }
        max_dd = max_dd.max(peak - value);
    }

    max_dd
}
