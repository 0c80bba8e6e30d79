//! Sample statistics shared by the metric and ranking layers.
//!
//! Every estimator here follows the convention of the return and earnings
//! literature the strategies come from: sample (N-1) variance, the average of
//! the two middle values for an even-length median, and `None` whenever the
//! statistic is undefined for the given input.

use ndarray::Array1;

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-12;

/// Collect the present, finite values of a series.
pub fn present(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with N-1 denominator (Bessel's correction).
///
/// Needs at least two observations.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    Some(values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64)
}

/// Sample standard deviation (N-1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Median, averaging the two middle values for even-length input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Number of distinct values in a slice.
pub fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// Sample covariance of two equally long arrays (N-1 denominator).
pub fn sample_covariance(x: &Array1<f64>, y: &Array1<f64>) -> Option<f64> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }
    let dx = x - x.mean()?;
    let dy = y - y.mean()?;
    Some((&dx * &dy).sum() / (n - 1) as f64)
}

/// Pearson correlation of two equally long arrays.
///
/// `None` when either side has (near) zero variance.
pub fn pearson_correlation(x: &Array1<f64>, y: &Array1<f64>) -> Option<f64> {
    let cov = sample_covariance(x, y)?;
    let sx = x.std(1.0);
    let sy = y.std(1.0);
    if sx < MIN_STD_THRESHOLD || sy < MIN_STD_THRESHOLD {
        return None;
    }
    Some(cov / (sx * sy))
}

/// Pair up two optional series and keep the positions where both are present.
pub fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Array1<f64>, Array1<f64>) {
    let (a, b): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
            _ => None,
        })
        .unzip();
    (Array1::from_vec(a), Array1::from_vec(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_present_skips_missing_and_nan() {
        let values = vec![Some(1.0), None, Some(f64::NAN), Some(3.0)];
        assert_eq!(present(&values), vec![1.0, 3.0]);
    }

    #[test]
    fn test_mean_and_std() {
        let values = [1.0, 1.2, 0.9, 1.1];
        assert_relative_eq!(mean(&values).unwrap(), 1.05, epsilon = 1e-12);
        // sqrt(0.05 / 3)
        assert_relative_eq!(sample_std(&values).unwrap(), 0.129_099_444_873_580_5, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_needs_two_values() {
        assert!(sample_variance(&[4.0]).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
        assert!(median(&[]).is_none());
    }

    #[test]
    fn test_distinct_count() {
        assert_eq!(distinct_count(&[1.0, 1.0, 2.0, 3.0, 3.0]), 3);
        assert_eq!(distinct_count(&[]), 0);
    }

    #[test]
    fn test_covariance_and_correlation() {
        let x = array![1.0, 2.0, 3.0, 4.0];
        let y = array![2.0, 4.0, 6.0, 8.0];
        assert_relative_eq!(sample_covariance(&x, &y).unwrap(), 10.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), 1.0, epsilon = 1e-12);

        let flat = array![5.0, 5.0, 5.0, 5.0];
        assert!(pearson_correlation(&x, &flat).is_none());
    }

    #[test]
    fn test_complete_pairs() {
        let x = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let y = vec![Some(2.0), Some(5.0), None, Some(8.0)];
        let (a, b) = complete_pairs(&x, &y);
        assert_eq!(a.to_vec(), vec![1.0, 4.0]);
        assert_eq!(b.to_vec(), vec![2.0, 8.0]);
    }
}
