use std::cmp::Ordering;

/// Quantile computation by linear interpolation between order statistics.
///
/// For a sorted dataset of length `n`, the `p`-quantile sits at position
/// `(n - 1) * p`; when that position falls between two order statistics the
/// result is interpolated linearly (Hyndman-Fan type 7, the default of most
/// spreadsheet and statistics packages).
///
/// # Returns
///
/// The interpolated value, or `f64::NAN` if the input is empty or `p` is not
/// within `0.0..=1.0`.
///
/// # Panics
///
/// Panics in debug mode if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use clinstat_stats::quantile::quantile_sorted;
///
/// let values = [1.0, 3.0, 5.0, 7.0];
/// assert_eq!(quantile_sorted(&values, 0.0), 1.0);
/// assert_eq!(quantile_sorted(&values, 0.5), 4.0);
/// assert_eq!(quantile_sorted(&values, 1.0), 7.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], p: f64) -> f64 {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a.partial_cmp(b) != Some(Ordering::Greater)),
        "values must be sorted in ascending order"
    );

    if sorted_values.is_empty() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    let pos = (sorted_values.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let lo_value = sorted_values[lo];
    if lo == hi {
        return lo_value;
    }
    let hi_value = sorted_values[hi];
    let t = pos - pos.floor();
    (lo_value + (hi_value - lo_value) * t).min(hi_value)
}

/// Quantile of unsorted values. Sorts a copy of the input.
///
/// ```
/// use clinstat_stats::quantile::quantile;
///
/// assert_eq!(quantile(&[5.0, 1.0, 3.0], 0.5), 3.0);
/// ```
#[must_use]
pub fn quantile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, p)
}
