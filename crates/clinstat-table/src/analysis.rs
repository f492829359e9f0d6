//! One-call analysis of a table

use serde::Serialize;
use tracing::debug;

use crate::{
    classify::numeric_columns,
    config::AnalysisConfig,
    describe::{ColumnSummary, describe_columns},
    matrix::CorrelationMatrix,
    table::Table,
};

/// Everything derived from one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub row_count: usize,
    /// One summary per numeric column, in table order.
    pub descriptive: Vec<ColumnSummary>,
    /// Columns classified as non-numeric, in table order.
    pub skipped_columns: Vec<String>,
    /// `None` when the table has no numeric column.
    pub correlation: Option<CorrelationMatrix>,
}

/// Classifies the columns of `table`, summarizes the numeric ones and
/// correlates them pairwise.
///
/// The result is recomputed from scratch on every call. The configuration
/// is used as given; call [`AnalysisConfig::validate`] first to reject
/// out-of-range settings.
///
/// ```
/// use clinstat_table::{
///     analysis::analyze,
///     config::AnalysisConfig,
///     table::{Cell, Table},
/// };
///
/// let table = Table::from_records(
///     ["a", "b", "c", "label"],
///     [
///         ["1", "2", "5", "x"],
///         ["2", "4", "4", "y"],
///         ["3", "6", "3", "x"],
///         ["4", "8", "2", "y"],
///         ["5", "10", "1", "x"],
///     ]
///     .map(|row| row.map(Cell::from).to_vec()),
/// )
/// .unwrap();
///
/// let analysis = analyze(&table, &AnalysisConfig::default());
/// assert_eq!(analysis.descriptive.len(), 3);
/// assert_eq!(analysis.skipped_columns, ["label"]);
///
/// let matrix = analysis.correlation.unwrap();
/// assert_eq!(matrix.get_by_name("a", "b").unwrap().r, 1.0);
/// assert_eq!(matrix.get_by_name("a", "c").unwrap().r, -1.0);
/// ```
#[must_use]
pub fn analyze(table: &Table, config: &AnalysisConfig) -> Analysis {
    let row_count = table.row_count();
    let columns = numeric_columns(table, &config.classifier, config.decimal);
    let skipped_columns = table
        .columns()
        .iter()
        .filter(|name| !columns.iter().any(|column| &column.name == *name))
        .cloned()
        .collect::<Vec<_>>();
    debug!(
        rows = row_count,
        numeric = columns.len(),
        skipped = skipped_columns.len(),
        "classified table"
    );

    let descriptive = describe_columns(&columns);
    let correlation = (!columns.is_empty())
        .then(|| CorrelationMatrix::compute(&columns, row_count, &config.correlation));

    Analysis {
        row_count,
        descriptive,
        skipped_columns,
        correlation,
    }
}
