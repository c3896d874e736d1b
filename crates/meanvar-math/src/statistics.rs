//! Sample statistics over return series.

use crate::error::{MathError, MathResult};

/// Arithmetic mean of a sample.
pub fn mean(xs: &[f64]) -> MathResult<f64> {
    if xs.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Unbiased sample covariance (`n - 1` denominator).
///
/// `sample_covariance(x, x)` is the sample variance of `x`.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> MathResult<f64> {
    if x.len() != y.len() {
        return Err(MathError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(MathError::insufficient_data(2, x.len()));
    }

    let mx = mean(x)?;
    let my = mean(y)?;
    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - mx) * (yi - my))
        .sum();

    Ok(sum / (x.len() - 1) as f64)
}

/// Period-over-period percentage change: `p[i] / p[i-1] - 1`.
///
/// Returns one fewer element than the input. A non-positive or non-finite
/// previous price is rejected.
pub fn pct_change(prices: &[f64]) -> MathResult<Vec<f64>> {
    prices
        .windows(2)
        .map(|pair| {
            let (prev, next) = (pair[0], pair[1]);
            if prev <= 0.0 || !prev.is_finite() || !next.is_finite() {
                return Err(MathError::invalid_input(format!(
                    "cannot compute change from {} to {}",
                    prev, next
                )));
            }
            Ok(next / prev - 1.0)
        })
        .collect()
}
