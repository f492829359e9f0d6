//! Pairwise correlation matrix
//!
//! # Construction
//!
//! For every pair `i < j` of numeric columns the matrix holds the
//! correlation over their pairwise-complete rows and its p-value. When FDR
//! correction is enabled the upper-triangle p-values, taken row-major, are
//! adjusted together with Benjamini-Hochberg. Every off-diagonal cell is
//! mirrored onto `(j, i)`, so the matrix is symmetric by construction.
//!
//! Diagonal cells are fixed to `r = 1`, `p = 0`, `q = 0` and
//! `n = row_count`, regardless of how many values the column actually has.

use clinstat_stats::{
    correlation::{Method, correlate},
    fdr::benjamini_hochberg,
    significance::SignificanceTest,
};
use serde::{Serialize, Serializer, ser::SerializeStruct as _};
use tracing::{debug, trace};

use crate::{classify::NumericColumn, config::CorrelationConfig};

/// One entry of a [`CorrelationMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationCell {
    pub r: f64,
    pub p: f64,
    /// FDR-adjusted p-value, `NaN` when correction is disabled.
    pub q: f64,
    pub n: usize,
}

impl CorrelationCell {
    fn diagonal(row_count: usize) -> Self {
        Self {
            r: 1.0,
            p: 0.0,
            q: 0.0,
            n: row_count,
        }
    }

    /// Star annotation of this cell's p-value, see [`significance_stars`].
    #[must_use]
    pub fn stars(&self, alpha: f64) -> &'static str {
        significance_stars(self.p, alpha)
    }
}

/// Cosmetic significance annotation.
///
/// `***` below 0.001, `**` below 0.01, `*` below `alpha` and empty otherwise
/// (including `NaN`).
///
/// ```
/// use clinstat_table::matrix::significance_stars;
///
/// assert_eq!(significance_stars(0.0004, 0.05), "***");
/// assert_eq!(significance_stars(0.004, 0.05), "**");
/// assert_eq!(significance_stars(0.03, 0.05), "*");
/// assert_eq!(significance_stars(0.03, 0.01), "");
/// assert_eq!(significance_stars(f64::NAN, 0.05), "");
/// ```
#[must_use]
pub fn significance_stars(p: f64, alpha: f64) -> &'static str {
    if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < alpha {
        "*"
    } else {
        ""
    }
}

/// Square correlation matrix over the numeric columns of a table.
///
/// Serializes with `cells` as a nested array of rows, so `cells[i][j]`
/// is the entry for `columns[i]` and `columns[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    method: Method,
    test: SignificanceTest,
    use_fdr: bool,
    alpha: f64,
    /// Row-major `k * k` cells.
    cells: Vec<CorrelationCell>,
}

struct Rows<'a> {
    cells: &'a [CorrelationCell],
    k: usize,
}

impl Serialize for Rows<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // `chunks` rejects a zero size; an empty matrix has no cells anyway
        serializer.collect_seq(self.cells.chunks(self.k.max(1)))
    }
}

impl Serialize for CorrelationMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("CorrelationMatrix", 6)?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field("method", &self.method)?;
        state.serialize_field("test", &self.test)?;
        state.serialize_field("use_fdr", &self.use_fdr)?;
        state.serialize_field("alpha", &self.alpha)?;
        state.serialize_field(
            "cells",
            &Rows {
                cells: &self.cells,
                k: self.len(),
            },
        )?;
        state.end()
    }
}

impl CorrelationMatrix {
    /// Computes the matrix for `columns`, each holding `row_count` values.
    ///
    /// ```
    /// use clinstat_table::{
    ///     classify::NumericColumn, config::CorrelationConfig, matrix::CorrelationMatrix,
    /// };
    ///
    /// let a = NumericColumn { name: "a".to_owned(), values: vec![Some(1.0), Some(2.0), Some(3.0)] };
    /// let b = NumericColumn { name: "b".to_owned(), values: vec![Some(6.0), Some(4.0), Some(2.0)] };
    /// let matrix = CorrelationMatrix::compute(&[a, b], 3, &CorrelationConfig::default());
    /// let cell = matrix.get_by_name("a", "b").unwrap();
    /// assert!((cell.r + 1.0).abs() < 1e-12);
    /// assert_eq!(cell.p, 0.0);
    /// ```
    #[must_use]
    pub fn compute(
        columns: &[NumericColumn],
        row_count: usize,
        config: &CorrelationConfig,
    ) -> Self {
        let k = columns.len();
        let mut cells = vec![CorrelationCell::diagonal(row_count); k * k];

        let mut upper = Vec::with_capacity(k * k.saturating_sub(1) / 2);
        for i in 0..k {
            for j in (i + 1)..k {
                let correlation = correlate(&columns[i].values, &columns[j].values, config.method);
                let p = config.test.p_value(correlation.r, correlation.n);
                trace!(
                    x = %columns[i].name,
                    y = %columns[j].name,
                    r = correlation.r,
                    p,
                    n = correlation.n,
                    "correlated pair"
                );
                upper.push((i, j, correlation.r, p, correlation.n));
            }
        }

        let q_values = if config.use_fdr {
            let p_values = upper.iter().map(|&(_, _, _, p, _)| p).collect::<Vec<_>>();
            benjamini_hochberg(&p_values)
        } else {
            vec![f64::NAN; upper.len()]
        };

        for (&(i, j, r, p, n), q) in upper.iter().zip(q_values) {
            let cell = CorrelationCell { r, p, q, n };
            cells[i * k + j] = cell;
            cells[j * k + i] = cell;
        }

        debug!(
            columns = k,
            pairs = upper.len(),
            method = ?config.method,
            test = ?config.test,
            use_fdr = config.use_fdr,
            "computed correlation matrix"
        );

        Self {
            columns: columns.iter().map(|c| c.name.clone()).collect(),
            method: config.method,
            test: config.test,
            use_fdr: config.use_fdr,
            alpha: config.alpha,
            cells,
        }
    }

    /// Column names, in matrix order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn test(&self) -> SignificanceTest {
        self.test
    }

    #[must_use]
    pub fn use_fdr(&self) -> bool {
        self.use_fdr
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Cell at `(i, j)`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&CorrelationCell> {
        let k = self.len();
        (i < k && j < k).then(|| &self.cells[i * k + j])
    }

    #[must_use]
    pub fn get_by_name(&self, x: &str, y: &str) -> Option<&CorrelationCell> {
        let i = self.columns.iter().position(|c| c == x)?;
        let j = self.columns.iter().position(|c| c == y)?;
        self.get(i, j)
    }

    /// Off-diagonal pairs `i < j` in row-major order.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (&str, &str, &CorrelationCell)> + '_ {
        let k = self.len();
        (0..k).flat_map(move |i| {
            ((i + 1)..k).map(move |j| {
                (
                    self.columns[i].as_str(),
                    self.columns[j].as_str(),
                    &self.cells[i * k + j],
                )
            })
        })
    }

    /// Row `i` of cells, or `None` if out of range.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[CorrelationCell]> {
        let k = self.len();
        (i < k).then(|| &self.cells[i * k..(i + 1) * k])
    }
}
