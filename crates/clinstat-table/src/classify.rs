//! Column classification
//!
//! Decides which columns of a [`Table`] hold numeric data by sampling their
//! first non-blank cells and checking what share of them parse as numbers.
//!
//! # Algorithm
//!
//! 1. Walk the column in row order, skipping blank cells
//! 2. Stop after [`ClassifierConfig::sample_size`] non-blank cells
//! 3. Parse each sampled cell with [`parse_cell`]
//! 4. The column is [`ColumnKind::Numeric`] if `parsed / sampled >= threshold`
//!
//! Columns with fewer than [`ClassifierConfig::min_count`] non-blank cells
//! are classified by the same rule but flagged as low confidence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    parse::{DecimalSeparator, parse_cell},
    table::Table,
};

/// Parameters of the column classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum number of non-blank cells inspected per column.
    pub sample_size: usize,
    /// Sample size below which a classification is reported as low confidence.
    pub min_count: usize,
    /// Minimum share of sampled cells that must parse as numbers.
    pub threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sample_size: 12,
            min_count: 4,
            threshold: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    Numeric,
    NonNumeric,
}

/// Outcome of classifying one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub kind: ColumnKind,
    /// Number of non-blank cells inspected.
    pub sampled: usize,
    /// Number of inspected cells that parsed as numbers.
    pub parsed: usize,
    /// `true` if fewer than `min_count` cells were available.
    pub low_confidence: bool,
}

/// Classifies a column of `table`.
///
/// Unknown columns and empty tables classify as [`ColumnKind::NonNumeric`]
/// with nothing sampled.
///
/// ```
/// use clinstat_table::{
///     classify::{ClassifierConfig, ColumnKind, classify},
///     parse::DecimalSeparator,
///     table::{Cell, Table},
/// };
///
/// let table = Table::from_records(
///     ["eGFR"],
///     ["61,5", "NA", "48", "90.1", "", "72"].map(|v| vec![Cell::from(v)]),
/// )
/// .unwrap();
/// let result = classify(&table, "eGFR", &ClassifierConfig::default(), DecimalSeparator::Period);
/// assert_eq!(result.kind, ColumnKind::Numeric);
/// assert_eq!((result.parsed, result.sampled), (4, 5));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn classify(
    table: &Table,
    column: &str,
    config: &ClassifierConfig,
    decimal: DecimalSeparator,
) -> Classification {
    let mut sampled = 0;
    let mut parsed = 0;
    if let Some(cells) = table.column(column) {
        for cell in cells
            .filter(|cell| !cell.is_blank())
            .take(config.sample_size)
        {
            sampled += 1;
            if parse_cell(cell, decimal).is_some() {
                parsed += 1;
            }
        }
    }

    let is_numeric = sampled > 0 && parsed as f64 / sampled as f64 >= config.threshold;
    Classification {
        kind: if is_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::NonNumeric
        },
        sampled,
        parsed,
        low_confidence: sampled < config.min_count,
    }
}

/// A numeric column and its parsed series, aligned 1:1 with table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    /// Parses every cell of column `name`.
    ///
    /// Returns `None` if the table has no such column.
    #[must_use]
    pub fn parse(table: &Table, name: &str, decimal: DecimalSeparator) -> Option<Self> {
        let values = table
            .column(name)?
            .map(|cell| parse_cell(cell, decimal))
            .collect();
        Some(Self {
            name: name.to_owned(),
            values,
        })
    }

    /// Valid values in row order.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.values.iter().flatten().count()
    }
}

/// Classifies every column and parses the numeric ones, in table order.
#[must_use]
pub fn numeric_columns(
    table: &Table,
    config: &ClassifierConfig,
    decimal: DecimalSeparator,
) -> Vec<NumericColumn> {
    table
        .columns()
        .iter()
        .filter_map(|name| {
            let classification = classify(table, name, config, decimal);
            debug!(
                column = %name,
                kind = ?classification.kind,
                sampled = classification.sampled,
                parsed = classification.parsed,
                low_confidence = classification.low_confidence,
                "classified column"
            );
            match classification.kind {
                ColumnKind::Numeric => NumericColumn::parse(table, name, decimal),
                ColumnKind::NonNumeric => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn single_column(values: &[&str]) -> Table {
        Table::from_records(["x"], values.iter().map(|v| vec![Cell::from(*v)])).unwrap()
    }

    fn kind_of(table: &Table) -> ColumnKind {
        classify(
            table,
            "x",
            &ClassifierConfig::default(),
            DecimalSeparator::Period,
        )
        .kind
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(["x"]).unwrap();
        let result = classify(
            &table,
            "x",
            &ClassifierConfig::default(),
            DecimalSeparator::Period,
        );
        assert_eq!(result.kind, ColumnKind::NonNumeric);
        assert_eq!(result.sampled, 0);
        assert!(result.low_confidence);
        assert!(numeric_columns(&table, &ClassifierConfig::default(), DecimalSeparator::Period).is_empty());
    }

    #[test]
    fn test_unknown_column() {
        let table = single_column(&["1", "2"]);
        let result = classify(
            &table,
            "y",
            &ClassifierConfig::default(),
            DecimalSeparator::Period,
        );
        assert_eq!(result.kind, ColumnKind::NonNumeric);
        assert_eq!(result.sampled, 0);
    }

    #[test]
    fn test_threshold_boundary() {
        // 3 of 5 = 0.6 parse
        assert_eq!(
            kind_of(&single_column(&["1", "2", "3", "a", "b"])),
            ColumnKind::Numeric
        );
        // 2 of 5 = 0.4 parse
        assert_eq!(
            kind_of(&single_column(&["1", "2", "a", "b", "c"])),
            ColumnKind::NonNumeric
        );
    }

    #[test]
    fn test_blank_cells_are_not_sampled() {
        let result = classify(
            &single_column(&["", "  ", "1", "", "2", "3", "4"]),
            "x",
            &ClassifierConfig::default(),
            DecimalSeparator::Period,
        );
        assert_eq!(result.sampled, 4);
        assert_eq!(result.parsed, 4);
        assert!(!result.low_confidence);
    }

    #[test]
    fn test_missing_tokens_count_against_numeric() {
        // NA is non-blank but does not parse
        assert_eq!(
            kind_of(&single_column(&["NA", "NA", "NA", "1"])),
            ColumnKind::NonNumeric
        );
    }

    #[test]
    fn test_sample_is_limited() {
        let mut values = vec!["1"; 12];
        values.extend(["text"; 30]);
        let result = classify(
            &single_column(&values),
            "x",
            &ClassifierConfig::default(),
            DecimalSeparator::Period,
        );
        assert_eq!(result.sampled, 12);
        assert_eq!(result.kind, ColumnKind::Numeric);
    }

    #[test]
    fn test_low_confidence_is_still_deterministic() {
        let result = classify(
            &single_column(&["5", ""]),
            "x",
            &ClassifierConfig::default(),
            DecimalSeparator::Period,
        );
        assert_eq!(result.kind, ColumnKind::Numeric);
        assert!(result.low_confidence);
    }

    #[test]
    fn test_numeric_columns_keep_table_order_and_alignment() {
        let table = Table::from_records(
            ["age", "sex", "uAlb"],
            [
                vec![Cell::from(54.0), Cell::from("F"), Cell::from("12,5")],
                vec![Cell::from("61"), Cell::from("M"), Cell::from("NA")],
                vec![Cell::Empty, Cell::from("F"), Cell::from("8")],
                vec![Cell::from("47"), Cell::from("M"), Cell::from("9.5")],
            ],
        )
        .unwrap();
        let columns = numeric_columns(
            &table,
            &ClassifierConfig::default(),
            DecimalSeparator::Period,
        );
        let names = columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["age", "uAlb"]);
        assert_eq!(columns[0].values, [Some(54.0), Some(61.0), None, Some(47.0)]);
        assert_eq!(columns[1].values, [Some(12.5), None, Some(8.0), Some(9.5)]);
        assert_eq!(columns[1].valid_count(), 3);
    }
}
