use std::cmp::Ordering;

use serde::Serialize;

use crate::quantile;

/// Descriptive statistics summarizing a dataset.
///
/// All fields are computed from the supplied values only. Measures that are
/// undefined for the given sample size are `NaN` rather than an error, so the
/// structure can always be built and rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of values.
    pub n: usize,
    /// The arithmetic mean. `NaN` for an empty dataset.
    pub mean: f64,
    /// Sample standard deviation (denominator `n - 1`). `NaN` iff `n < 2`.
    pub sd: f64,
    /// The minimum value (`quantile(0.0)`).
    pub min: f64,
    /// First quartile (`quantile(0.25)`).
    pub q1: f64,
    /// The median (`quantile(0.5)`).
    pub median: f64,
    /// Third quartile (`quantile(0.75)`).
    pub q3: f64,
    /// The maximum value (`quantile(1.0)`).
    pub max: f64,
    /// Interquartile range (`q3 - q1`).
    pub iqr: f64,
    /// Number of values equal to zero.
    pub zeros: usize,
    /// Number of negative values.
    pub negatives: usize,
    /// Adjusted Fisher-Pearson sample skewness. `NaN` when `n < 3` or `sd == 0`.
    pub skewness: f64,
    /// Sample excess kurtosis. `NaN` when `n < 4` or `sd == 0`.
    pub kurtosis: f64,
    /// Number of values farther than `1.5 * iqr` from the median.
    pub outliers_iqr: usize,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clinstat_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]);
    /// assert_eq!(stats.n, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clinstat_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(stats.q1, 1.75);
    /// assert_eq!(stats.median, 2.5);
    /// assert_eq!(stats.q3, 3.25);
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a.partial_cmp(b) != Some(Ordering::Greater)),
            "values must be sorted in ascending order"
        );

        let n = sorted_values.len();
        let mean = mean(sorted_values);
        let sd = sample_std_dev(sorted_values);
        let q1 = quantile::quantile_sorted(sorted_values, 0.25);
        let median = quantile::quantile_sorted(sorted_values, 0.5);
        let q3 = quantile::quantile_sorted(sorted_values, 0.75);
        let iqr = q3 - q1;

        Self {
            n,
            mean,
            sd,
            min: quantile::quantile_sorted(sorted_values, 0.0),
            q1,
            median,
            q3,
            max: quantile::quantile_sorted(sorted_values, 1.0),
            iqr,
            zeros: sorted_values.iter().filter(|v| **v == 0.0).count(),
            negatives: sorted_values.iter().filter(|v| **v < 0.0).count(),
            skewness: skewness(sorted_values, mean, sd),
            kurtosis: excess_kurtosis(sorted_values, mean, sd),
            outliers_iqr: sorted_values
                .iter()
                .filter(|v| (**v - median).abs() > 1.5 * iqr)
                .count(),
        }
    }
}

/// Arithmetic mean, `NaN` for an empty slice.
///
/// ```
/// # use clinstat_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
/// assert!(mean(&[]).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation with denominator `n - 1`, `NaN` when `n < 2`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    (ss / (n - 1) as f64).sqrt()
}

#[expect(clippy::cast_precision_loss)]
fn skewness(values: &[f64], mean: f64, sd: f64) -> f64 {
    let n = values.len();
    if n < 3 || sd.is_nan() || sd <= 0.0 {
        return f64::NAN;
    }
    let nf = n as f64;
    let m3 = values.iter().map(|v| ((v - mean) / sd).powi(3)).sum::<f64>();
    nf / ((nf - 1.0) * (nf - 2.0)) * m3
}

#[expect(clippy::cast_precision_loss)]
fn excess_kurtosis(values: &[f64], mean: f64, sd: f64) -> f64 {
    let n = values.len();
    if n < 4 || sd.is_nan() || sd <= 0.0 {
        return f64::NAN;
    }
    let nf = n as f64;
    let m4 = values.iter().map(|v| ((v - mean) / sd).powi(4)).sum::<f64>();
    let term = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * m4;
    term - 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0))
}
