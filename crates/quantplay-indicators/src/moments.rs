//! Sample moments over paired observations.

/// Sample covariance (n - 1 denominator) of paired observations.
///
/// Only the first `min(x.len(), y.len())` pairs are used. Fewer than two
/// pairs yield `NaN`, and a `NaN` anywhere propagates to the result.
/// `sample_covariance(x, x)` is the sample variance of `x`.
#[must_use]
pub fn sample_covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;
    let sum: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    sum / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_covariance() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 5.0, 4.0];
        assert_relative_eq!(sample_covariance(&x, &y), 3.5 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(sample_covariance(&x, &x), 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_pairs() {
        assert!(sample_covariance(&[1.0], &[2.0]).is_nan());
        assert!(sample_covariance(&[], &[]).is_nan());
    }

    #[test]
    fn test_nan_propagates() {
        assert!(sample_covariance(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_constant_series_has_zero_variance() {
        let x = [0.5, 0.5, 0.5];
        assert_eq!(sample_covariance(&x, &x), 0.0);
    }
}
