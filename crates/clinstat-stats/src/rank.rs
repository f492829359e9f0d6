/// Assigns 1-based ranks to values, giving tied values the average of the
/// positions they jointly occupy ("fractional" ranking).
///
/// The output has the same length and order as the input. A run of equal
/// values covering sorted positions `lo..=hi` (0-based) receives rank
/// `(lo + hi) / 2 + 1`.
///
/// # Examples
///
/// ```
/// use clinstat_stats::rank::rank;
///
/// assert_eq!(rank(&[5.0, 5.0, 1.0, 3.0]), vec![3.5, 3.5, 1.0, 2.0]);
/// assert_eq!(rank(&[10.0, 30.0, 20.0]), vec![1.0, 3.0, 2.0]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rank(values: &[f64]) -> Vec<f64> {
    let mut order = values.iter().copied().enumerate().collect::<Vec<_>>();
    // stable: equal values keep their original relative order
    order.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    let mut ranks = vec![0.0; values.len()];
    let mut lo = 0;
    while lo < order.len() {
        let mut hi = lo;
        while hi + 1 < order.len() && order[hi + 1].1 == order[lo].1 {
            hi += 1;
        }
        let average = (lo + hi) as f64 / 2.0 + 1.0;
        for &(index, _) in &order[lo..=hi] {
            ranks[index] = average;
        }
        lo = hi + 1;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn test_sorted_run_of_ties() {
        assert_eq!(rank(&[1.0, 3.0, 5.0, 5.0]), vec![1.0, 2.0, 3.5, 3.5]);
    }

    #[test]
    fn test_all_tied() {
        assert_eq!(rank(&[2.0, 2.0, 2.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        assert_eq!(rank(&[0.0, -0.0, -1.0]), vec![2.5, 2.5, 1.0]);
    }

    proptest! {
        #[test]
        fn prop_rank_sum_is_triangular(values in prop::collection::vec(-100..100_i32, 0..50)) {
            let values = values.into_iter().map(f64::from).collect::<Vec<_>>();
            let n = values.len();
            let sum = rank(&values).iter().sum::<f64>();
            #[expect(clippy::cast_precision_loss)]
            let expected = (n * (n + 1)) as f64 / 2.0;
            prop_assert!((sum - expected).abs() < 1e-9);
        }
    }
}
