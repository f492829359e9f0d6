//! Two-sided significance tests for a correlation coefficient.
//!
//! Both tests answer the same question (how likely is a correlation at least
//! this strong if the true correlation were zero) but are not numerically
//! identical. [`SignificanceTest::StudentT`] is the canonical choice; the
//! Fisher z approximation is kept for callers that want to reproduce results
//! computed with it.

use serde::{Deserialize, Serialize};

use crate::special;

/// Strategy used to turn a correlation coefficient into a p-value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignificanceTest {
    /// Student's t test with `n - 2` degrees of freedom, evaluated through
    /// the regularized incomplete beta function. Requires `n >= 3`.
    #[default]
    StudentT,
    /// Fisher z transform with a normal approximation. Requires `n >= 4`.
    FisherZ,
}

impl SignificanceTest {
    /// Smallest sample size for which the test produces a p-value.
    #[must_use]
    pub fn min_n(self) -> usize {
        match self {
            Self::StudentT => 3,
            Self::FisherZ => 4,
        }
    }

    /// Two-sided p-value for correlation `r` over `n` paired observations.
    ///
    /// Returns `NaN` when `r` is `NaN` or `n` is below [`Self::min_n`].
    ///
    /// ```
    /// use clinstat_stats::significance::SignificanceTest;
    ///
    /// let p = SignificanceTest::StudentT.p_value(0.5, 10);
    /// assert!((p - 0.141_113).abs() < 1e-5);
    /// assert!(SignificanceTest::StudentT.p_value(0.9, 2).is_nan());
    /// ```
    #[must_use]
    pub fn p_value(self, r: f64, n: usize) -> f64 {
        match self {
            Self::StudentT => student_t_p_value(r, n),
            Self::FisherZ => fisher_z_p_value(r, n),
        }
    }
}

/// Two-sided p-value from Student's t distribution.
///
/// `t = r * sqrt(df / (1 - r²))` with `df = n - 2`, and the two-sided tail
/// probability is `I_x(df / 2, 1 / 2)` where `x = df / (df + t²)`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn student_t_p_value(r: f64, n: usize) -> f64 {
    if r.is_nan() || n < 3 {
        return f64::NAN;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let x = df / (df + t * t);
    special::incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// Two-sided p-value from the Fisher z transform.
///
/// `z = atanh(r)`, `z0 = |z| * sqrt(n - 3)`, `p = 2 * (1 - Φ(z0))`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn fisher_z_p_value(r: f64, n: usize) -> f64 {
    if r.is_nan() || n < 4 {
        return f64::NAN;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let z0 = r.atanh().abs() * ((n - 3) as f64).sqrt();
    (2.0 * (1.0 - special::normal_cdf(z0))).clamp(0.0, 1.0)
}
