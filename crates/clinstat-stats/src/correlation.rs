//! Pearson and Spearman correlation over pairwise-complete observations.

use serde::{Deserialize, Serialize};

use crate::{descriptive, rank};

/// Correlation coefficient to compute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Linear (product-moment) correlation.
    #[default]
    Pearson,
    /// Rank correlation: Pearson on the average-rank transform of each series.
    Spearman,
}

/// Result of [`correlate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Correlation {
    /// Correlation coefficient in `[-1, 1]`, or `NaN` when undefined.
    pub r: f64,
    /// Number of pairwise-complete observations.
    pub n: usize,
}

impl Correlation {
    /// Minimum number of pairwise-complete observations for a defined `r`.
    pub const MIN_N: usize = 3;
}

/// Correlates two aligned series, skipping positions where either side is
/// missing.
///
/// `r` is `NaN` when fewer than [`Correlation::MIN_N`] complete pairs exist
/// or when either series is constant over the complete pairs.
///
/// # Examples
///
/// ```
/// use clinstat_stats::correlation::{Method, correlate};
///
/// let x = [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)];
/// let y = [Some(2.0), Some(4.0), Some(6.0), Some(8.0), None];
/// let result = correlate(&x, &y, Method::Pearson);
/// assert_eq!(result.n, 3);
/// assert!((result.r - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn correlate(x: &[Option<f64>], y: &[Option<f64>], method: Method) -> Correlation {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();
    let n = xs.len();
    if n < Correlation::MIN_N {
        return Correlation { r: f64::NAN, n };
    }

    let r = match method {
        Method::Pearson => pearson(&xs, &ys),
        Method::Spearman => pearson(&rank::rank(&xs), &rank::rank(&ys)),
    };
    Correlation { r, n }
}

/// Pearson product-moment correlation of two equal-length slices.
///
/// Returns `NaN` when the slices differ in length, hold fewer than two
/// values, or either has zero variance. The result is clamped to `[-1, 1]`
/// to absorb rounding.
///
/// Deviations are divided by their largest magnitude before the sums are
/// accumulated, so the sums do not overflow for values near the limits of
/// `f64`. A mean that overflows yields `NaN`.
///
/// ```
/// use clinstat_stats::correlation::pearson;
///
/// assert_eq!(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0);
/// assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
/// ```
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return f64::NAN;
    }
    let mean_x = descriptive::mean(xs);
    let mean_y = descriptive::mean(ys);
    let scale_x = max_abs_deviation(xs, mean_x);
    let scale_y = max_abs_deviation(ys, mean_y);
    // zero spread, or an overflowed mean
    let usable = |scale: f64| scale.is_finite() && scale > 0.0;
    if !usable(scale_x) || !usable(scale_y) {
        return f64::NAN;
    }

    // scaled deviations lie in [-1, 1], so the sums cannot overflow
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = (x - mean_x) / scale_x;
        let dy = (y - mean_y) / scale_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

fn max_abs_deviation(values: &[f64], mean: f64) -> f64 {
    values
        .iter()
        .map(|v| (v - mean).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let x = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let up = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let down = some(&[5.0, 4.0, 3.0, 2.0, 1.0]);
        for method in [Method::Pearson, Method::Spearman] {
            assert_eq!(correlate(&x, &up, method).r, 1.0);
            assert_eq!(correlate(&x, &down, method).r, -1.0);
        }
    }

    #[test]
    fn test_self_correlation_is_one() {
        let mut rng = Pcg32::seed_from_u64(7);
        let x = (0..50).map(|_| rng.random_range(-10.0..10.0)).collect::<Vec<f64>>();
        assert_eq!(pearson(&x, &x), 1.0);
    }

    #[test]
    fn test_extreme_magnitudes() {
        for scale in [1e-200, 1e100, 1e160] {
            let x = [1.0, 2.0, 3.0, 4.0].map(|v| v * scale);
            let y = [4.0, 3.0, 2.0, 1.0].map(|v| v * scale);
            assert_eq!(pearson(&x, &x), 1.0, "scale {scale}");
            assert_eq!(pearson(&x, &y), -1.0, "scale {scale}");
        }
        let x = [1e300, 2e300, 3e300, 4e300];
        assert_eq!(pearson(&x, &x), 1.0);
        assert!((pearson(&x, &[4.0, 3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);

        let x = [1e100, 3e100, 2e100, 5e100];
        let y = [1.0, 3.0, 2.0, 5.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overflowing_mean_is_nan() {
        let x = [f64::MAX, f64::MAX, 0.0];
        assert!(pearson(&x, &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_pairwise_complete_subset() {
        let x = [Some(1.0), None, Some(3.0), Some(4.0), Some(7.0)];
        let y = [Some(1.0), Some(9.0), None, Some(2.0), Some(5.0)];
        let result = correlate(&x, &y, Method::Pearson);
        assert_eq!(result.n, 3);
        let expected = pearson(&[1.0, 4.0, 7.0], &[1.0, 2.0, 5.0]);
        assert_eq!(result.r, expected);
    }

    #[test]
    fn test_mismatched_lengths_use_shorter() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[2.0, 4.0, 6.0]);
        assert_eq!(correlate(&x, &y, Method::Pearson).n, 3);
    }

    #[test]
    fn test_too_few_pairs() {
        let x = some(&[1.0, 2.0]);
        let y = some(&[2.0, 1.0]);
        let result = correlate(&x, &y, Method::Pearson);
        assert_eq!(result.n, 2);
        assert!(result.r.is_nan());
        // the raw kernel is still defined for two points
        assert_eq!(pearson(&[1.0, 2.0], &[2.0, 1.0]), -1.0);
    }

    #[test]
    fn test_zero_variance() {
        let x = some(&[3.0, 3.0, 3.0, 3.0]);
        let y = some(&[1.0, 2.0, 3.0, 4.0]);
        for method in [Method::Pearson, Method::Spearman] {
            assert!(correlate(&x, &y, method).r.is_nan());
            assert!(correlate(&y, &x, method).r.is_nan());
        }
    }

    #[test]
    fn test_spearman_differs_from_pearson_on_nonlinear_data() {
        let x = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let y = some(&[1.0, 4.0, 9.0, 16.0, 100.0]);
        let spearman = correlate(&x, &y, Method::Spearman).r;
        let pearson = correlate(&x, &y, Method::Pearson).r;
        assert_eq!(spearman, 1.0);
        assert!(pearson < 1.0);
    }

    #[test]
    fn test_spearman_with_ties() {
        let x = some(&[1.0, 2.0, 2.0, 3.0]);
        let y = some(&[10.0, 20.0, 20.0, 30.0]);
        assert!((correlate(&x, &y, Method::Spearman).r - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_spearman_invariant_under_monotone_transform(
            pairs in prop::collection::vec((-50.0..50.0_f64, -50.0..50.0_f64), 3..40)
        ) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let x = some(&xs);
            let y = some(&ys);
            let transformed = ys.iter().map(|v| Some(v.exp() + 3.0 * v)).collect::<Vec<_>>();

            let original = correlate(&x, &y, Method::Spearman).r;
            let monotone = correlate(&x, &transformed, Method::Spearman).r;
            if original.is_nan() {
                prop_assert!(monotone.is_nan());
            } else {
                prop_assert!((original - monotone).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_correlation_is_symmetric_and_bounded(
            pairs in prop::collection::vec((-1e3..1e3_f64, -1e3..1e3_f64), 0..40)
        ) {
            let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let x = some(&xs);
            let y = some(&ys);
            for method in [Method::Pearson, Method::Spearman] {
                let xy = correlate(&x, &y, method);
                let yx = correlate(&y, &x, method);
                prop_assert_eq!(xy.n, yx.n);
                prop_assert!((xy.r.is_nan() && yx.r.is_nan()) || xy.r == yx.r);
                prop_assert!(xy.r.is_nan() || (-1.0..=1.0).contains(&xy.r));
            }
        }
    }
}
