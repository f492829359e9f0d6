/// Benjamini-Hochberg false discovery rate adjustment.
///
/// Returns q-values in the same order as `p_values`. With the finite
/// p-values sorted ascending as `p_(1) ≤ … ≤ p_(m)`:
///
/// ```text
/// q_(m) = p_(m)
/// q_(i) = min(q_(i+1), p_(i) * m / i)
/// ```
///
/// so q-values are non-decreasing in p-sorted order and never exceed 1.
/// `NaN` inputs do not count towards `m` and map to `NaN`.
///
/// # Examples
///
/// ```
/// use clinstat_stats::fdr::benjamini_hochberg;
///
/// let q = benjamini_hochberg(&[0.04, 0.001, 0.2, 0.01, 0.02]);
/// assert!((q[0] - 0.05).abs() < 1e-12);
/// assert!((q[2] - 0.2).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let mut q_values = vec![f64::NAN; p_values.len()];

    let mut order = p_values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| !p.is_nan())
        .collect::<Vec<_>>();
    order.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    let m = order.len() as f64;
    let mut running_min = 1.0_f64;
    for (rank, &(index, p)) in order.iter().enumerate().rev() {
        let adjusted = p * m / (rank + 1) as f64;
        running_min = running_min.min(adjusted);
        q_values[index] = running_min.clamp(0.0, 1.0);
    }
    q_values
}
