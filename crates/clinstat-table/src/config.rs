//! Analysis configuration
//!
//! All configuration types deserialize with per-field defaults, so a JSON
//! file only needs to name the settings it changes:
//!
//! ```
//! use clinstat_stats::correlation::Method;
//! use clinstat_table::config::AnalysisConfig;
//!
//! let config: AnalysisConfig =
//!     serde_json::from_str(r#"{"correlation": {"method": "spearman"}}"#).unwrap();
//! assert_eq!(config.correlation.method, Method::Spearman);
//! assert!(config.correlation.use_fdr);
//! assert_eq!(config.classifier.sample_size, 12);
//! ```

use clinstat_stats::{correlation::Method, significance::SignificanceTest};
use serde::{Deserialize, Serialize};

use crate::{classify::ClassifierConfig, parse::DecimalSeparator};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("alpha must lie strictly between 0 and 1, got {alpha}")]
    InvalidAlpha { alpha: f64 },
    #[display("classification threshold must lie in (0, 1], got {threshold}")]
    InvalidThreshold { threshold: f64 },
    #[display("classification sample size must be positive")]
    ZeroSampleSize,
}

/// How the correlation matrix is computed and annotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    pub method: Method,
    pub test: SignificanceTest,
    /// Adjust p-values with Benjamini-Hochberg. Without it every `q` is `NaN`.
    pub use_fdr: bool,
    /// Significance level used for star annotations only.
    pub alpha: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            test: SignificanceTest::default(),
            use_fdr: true,
            alpha: 0.05,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub decimal: DecimalSeparator,
    pub classifier: ClassifierConfig,
    pub correlation: CorrelationConfig,
}

impl AnalysisConfig {
    /// Checks the numeric settings.
    ///
    /// ```
    /// use clinstat_table::config::{AnalysisConfig, ConfigError};
    ///
    /// let mut config = AnalysisConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.correlation.alpha = 1.0;
    /// assert!(matches!(config.validate(), Err(ConfigError::InvalidAlpha { .. })));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let alpha = self.correlation.alpha;
        if alpha.is_nan() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(ConfigError::InvalidAlpha { alpha });
        }
        let threshold = self.classifier.threshold;
        if threshold.is_nan() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ConfigError::InvalidThreshold { threshold });
        }
        if self.classifier.sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.decimal, DecimalSeparator::Period);
        assert_eq!(config.correlation.method, Method::Pearson);
        assert_eq!(config.correlation.test, SignificanceTest::StudentT);
        assert_eq!(config.correlation.alpha, 0.05);
        assert_eq!(config.classifier.threshold, 0.6);
        assert_eq!(config.classifier.min_count, 4);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = AnalysisConfig::default();
        config.correlation.alpha = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAlpha { .. })
        ));

        let mut config = AnalysisConfig::default();
        config.classifier.threshold = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { .. })
        ));

        let mut config = AnalysisConfig::default();
        config.classifier.threshold = 1.0;
        assert!(config.validate().is_ok());
        config.classifier.sample_size = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "classification sample size must be positive");
    }

    #[test]
    fn test_json_round_trip() {
        let config = AnalysisConfig {
            decimal: DecimalSeparator::Comma,
            correlation: CorrelationConfig {
                method: Method::Spearman,
                test: SignificanceTest::FisherZ,
                use_fdr: false,
                alpha: 0.01,
            },
            ..AnalysisConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""decimal":"comma""#));
        assert!(json.contains(r#""test":"fisher-z""#));
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
