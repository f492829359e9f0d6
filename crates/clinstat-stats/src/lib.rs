//! Statistical kernels for the clinstat workspace.
//!
//! This crate works on plain `f64` slices and knows nothing about tables or
//! column names. It provides:
//!
//! - **Descriptive statistics**: mean, sample standard deviation, quartiles, shape measures
//! - **Quantiles**: type-7 linear interpolation between order statistics
//! - **Rank transform**: average ranks for tied values
//! - **Correlation**: Pearson and Spearman over pairwise-complete observations
//! - **Significance tests**: Student's t (canonical) and Fisher z p-values
//! - **Special functions**: log-gamma, regularized incomplete beta, normal CDF
//! - **Multiple comparisons**: Benjamini-Hochberg false discovery rate
//!
//! Every function is total: degenerate or undersized input yields `NaN`
//! instead of a panic or an error.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`quantile`]: Quantile interpolation on sorted data
//! - [`rank`]: Fractional ranking with tie handling
//! - [`correlation`]: Correlation coefficients
//! - [`significance`]: p-values for correlation coefficients
//! - [`special`]: Numerical special functions
//! - [`fdr`]: False discovery rate adjustment
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use clinstat_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]);
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.q1, 2.0);
//! ```
//!
//! ## Testing a correlation
//!
//! ```
//! use clinstat_stats::{
//!     correlation::{Method, correlate},
//!     significance::SignificanceTest,
//! };
//!
//! let x = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
//! let y = [Some(1.2), Some(1.9), Some(3.4), Some(3.9), Some(5.3)];
//! let result = correlate(&x, &y, Method::Spearman);
//! let p = SignificanceTest::StudentT.p_value(result.r, result.n);
//! assert_eq!(result.r, 1.0);
//! assert_eq!(p, 0.0);
//! ```
//!
//! ## Adjusting for multiple comparisons
//!
//! ```
//! use clinstat_stats::fdr::benjamini_hochberg;
//!
//! let q = benjamini_hochberg(&[0.01, 0.02, 0.03]);
//! assert!(q.iter().all(|q| (q - 0.03).abs() < 1e-12));
//! ```

pub mod correlation;
pub mod descriptive;
pub mod fdr;
pub mod quantile;
pub mod rank;
pub mod significance;
pub mod special;
