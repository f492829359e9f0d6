//! Per-column descriptive summaries

use clinstat_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::classify::NumericColumn;

/// One record of the descriptive table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Number of rows whose cell did not parse as a number.
    pub missing: usize,
    /// `missing` as a percentage of the row count, 0 for an empty table.
    pub missing_pct: f64,
    #[serde(flatten)]
    pub stats: DescriptiveStats,
}

impl ColumnSummary {
    /// Summarizes a parsed column.
    ///
    /// ```
    /// use clinstat_table::{classify::NumericColumn, describe::ColumnSummary};
    ///
    /// let column = NumericColumn {
    ///     name: "uCrea".to_owned(),
    ///     values: vec![Some(10.0), Some(20.5), None, None, Some(30.0)],
    /// };
    /// let summary = ColumnSummary::from_column(&column);
    /// assert_eq!(summary.stats.n, 3);
    /// assert_eq!(summary.missing, 2);
    /// assert_eq!(summary.missing_pct, 40.0);
    /// assert_eq!(summary.stats.median, 20.5);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_column(column: &NumericColumn) -> Self {
        let row_count = column.values.len();
        let stats = DescriptiveStats::new(column.valid_values());
        let missing = row_count - stats.n;
        let missing_pct = if row_count == 0 {
            0.0
        } else {
            100.0 * missing as f64 / row_count as f64
        };
        Self {
            name: column.name.clone(),
            missing,
            missing_pct,
            stats,
        }
    }
}

/// Summarizes every column, keeping their order.
#[must_use]
pub fn describe_columns(columns: &[NumericColumn]) -> Vec<ColumnSummary> {
    columns.iter().map(ColumnSummary::from_column).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_mixed_column() {
        let column = NumericColumn {
            name: "x".to_owned(),
            values: vec![Some(10.0), Some(20.5), None, None, Some(30.0)],
        };
        let summary = ColumnSummary::from_column(&column);
        assert!((summary.stats.mean - 20.166_666_666_666_668).abs() < 1e-9);
        assert_eq!(summary.missing_pct, 40.0);
    }

    #[test]
    fn test_all_missing() {
        let column = NumericColumn {
            name: "x".to_owned(),
            values: vec![None, None],
        };
        let summary = ColumnSummary::from_column(&column);
        assert_eq!(summary.stats.n, 0);
        assert_eq!(summary.missing, 2);
        assert_eq!(summary.missing_pct, 100.0);
        assert!(summary.stats.mean.is_nan());
    }

    #[test]
    fn test_empty_column() {
        let column = NumericColumn {
            name: "x".to_owned(),
            values: vec![],
        };
        let summary = ColumnSummary::from_column(&column);
        assert_eq!(summary.missing, 0);
        assert_eq!(summary.missing_pct, 0.0);
    }

    #[test]
    fn test_serializes_flat_with_nan_as_null() {
        let column = NumericColumn {
            name: "x".to_owned(),
            values: vec![Some(4.0), None],
        };
        let json = serde_json::to_value(ColumnSummary::from_column(&column)).unwrap();
        assert_eq!(json["name"], "x");
        assert_eq!(json["n"], 1);
        assert_eq!(json["missing"], 1);
        assert_eq!(json["median"], 4.0);
        assert!(json["sd"].is_null());
    }

    proptest! {
        #[test]
        fn prop_n_plus_missing_is_row_count(
            values in prop::collection::vec(prop::option::of(-1e6..1e6_f64), 0..50),
        ) {
            let column = NumericColumn { name: "x".to_owned(), values };
            let summary = ColumnSummary::from_column(&column);
            prop_assert_eq!(summary.stats.n + summary.missing, column.values.len());
            prop_assert!((0.0..=100.0).contains(&summary.missing_pct));
        }
    }
}
