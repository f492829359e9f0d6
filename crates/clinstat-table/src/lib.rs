//! Table model and analysis pipeline for exploratory clinical data
//!
//! This crate turns an arbitrary table of raw cells into per-column
//! descriptive statistics and a pairwise correlation matrix, using the
//! numeric kernels of [`clinstat_stats`].
//!
//! # Overview
//!
//! The pipeline runs leaf-first, and every stage is a pure function of its
//! input:
//!
//! 1. **Table** ([`table::Table`]): Ordered columns and rows of raw [`table::Cell`]s
//! 2. **Parsing** ([`parse::parse_cell`]): Locale-aware conversion of a cell to `Option<f64>`
//! 3. **Classification** ([`classify::numeric_columns`]): Sample each column and keep
//!    the numeric ones with their parsed series
//! 4. **Descriptive Statistics** ([`describe::ColumnSummary`]): One summary per numeric column
//! 5. **Correlation Matrix** ([`matrix::CorrelationMatrix`]): Pairwise r, p-value and
//!    FDR-adjusted q-value
//!
//! [`analysis::analyze`] runs the whole pipeline with an
//! [`config::AnalysisConfig`].
//!
//! # Failure Model
//!
//! Nothing past table construction fails. Cells that do not parse are
//! missing data, columns that do not look numeric are skipped, and
//! statistics that are undefined for the available data are `NaN`.
//!
//! # Examples
//!
//! ## Analyzing row objects
//!
//! ```
//! use clinstat_table::{analysis::analyze, config::AnalysisConfig, table::Table};
//!
//! let table: Table = serde_json::from_str(
//!     r#"[
//!         {"age": 54, "uAlb": "12,5", "sex": "F"},
//!         {"age": 61, "uAlb": "30.1", "sex": "M"},
//!         {"age": 47, "uAlb": "NA",   "sex": "F"},
//!         {"age": 70, "uAlb": "41",   "sex": "M"}
//!     ]"#,
//! )
//! .unwrap();
//!
//! let analysis = analyze(&table, &AnalysisConfig::default());
//! assert_eq!(analysis.skipped_columns, ["sex"]);
//!
//! let alb = &analysis.descriptive[1];
//! assert_eq!(alb.name, "uAlb");
//! assert_eq!(alb.missing, 1);
//!
//! let matrix = analysis.correlation.unwrap();
//! let cell = matrix.get_by_name("age", "uAlb").unwrap();
//! assert_eq!(cell.n, 3);
//! assert!(cell.r > 0.9);
//! ```
//!
//! ## Ranking significant pairs
//!
//! ```
//! use clinstat_stats::correlation::Method;
//! use clinstat_table::{
//!     classify::NumericColumn, config::CorrelationConfig, matrix::CorrelationMatrix,
//! };
//!
//! let columns = [
//!     NumericColumn { name: "x".into(), values: (0..20).map(|i| Some(f64::from(i))).collect() },
//!     NumericColumn { name: "y".into(), values: (0..20).map(|i| Some(f64::from(i * i))).collect() },
//!     NumericColumn { name: "z".into(), values: (0..20).map(|i| Some(f64::from(i % 3))).collect() },
//! ];
//! let config = CorrelationConfig { method: Method::Spearman, ..CorrelationConfig::default() };
//! let matrix = CorrelationMatrix::compute(&columns, 20, &config);
//!
//! let significant = matrix
//!     .upper_triangle()
//!     .filter(|(_, _, cell)| cell.q < config.alpha)
//!     .map(|(x, y, _)| (x, y))
//!     .collect::<Vec<_>>();
//! assert_eq!(significant, [("x", "y")]);
//! ```

pub mod analysis;
pub mod classify;
pub mod config;
pub mod describe;
pub mod matrix;
pub mod parse;
pub mod table;
