//! Options shared by the analysis subcommands

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use clinstat_stats::{correlation::Method, significance::SignificanceTest};
use clinstat_table::{
    config::{AnalysisConfig, CorrelationConfig},
    parse::DecimalSeparator,
    table::Table,
};
use tracing::info;

use crate::{input, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct InputArg {
    /// Path to the input table (.json row objects, otherwise delimited text)
    pub input: PathBuf,

    /// Field delimiter (detected from the header line by default)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Primary decimal separator for cells containing both ',' and '.'
    #[arg(long, value_enum)]
    pub decimal: Option<DecimalArg>,

    /// JSON file with analysis settings; command-line options override it
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl InputArg {
    /// Loads the settings file (or defaults) and applies `--decimal`.
    pub(crate) fn base_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!(path = %path.display(), "reading settings");
                util::read_config_file(path)?
            }
            None => AnalysisConfig::default(),
        };
        if let Some(decimal) = self.decimal {
            config.decimal = decimal.into();
        }
        Ok(config)
    }

    pub(crate) fn read_table(&self) -> anyhow::Result<Table> {
        let delimiter = self.delimiter.map(input::delimiter_byte).transpose()?;
        input::read_table(&self.input, delimiter)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct CorrelationArg {
    /// Correlation coefficient
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Significance test for p-values
    #[arg(long, value_enum)]
    pub test: Option<TestArg>,

    /// Disable Benjamini-Hochberg adjustment
    #[arg(long)]
    pub no_fdr: bool,

    /// Significance level for star annotations
    #[arg(long)]
    pub alpha: Option<f64>,
}

impl CorrelationArg {
    pub(crate) fn apply(&self, config: &mut CorrelationConfig) {
        if let Some(method) = self.method {
            config.method = method.into();
        }
        if let Some(test) = self.test {
            config.test = test.into();
        }
        if self.no_fdr {
            config.use_fdr = false;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
    }
}

/// Builds the effective configuration and validates it.
pub(crate) fn load_config(
    input: &InputArg,
    correlation: &CorrelationArg,
) -> anyhow::Result<AnalysisConfig> {
    let mut config = input.base_config()?;
    correlation.apply(&mut config.correlation);
    config.validate()?;
    Ok(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DecimalArg {
    Period,
    Comma,
}

impl From<DecimalArg> for DecimalSeparator {
    fn from(value: DecimalArg) -> Self {
        match value {
            DecimalArg::Period => DecimalSeparator::Period,
            DecimalArg::Comma => DecimalSeparator::Comma,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MethodArg {
    Pearson,
    Spearman,
}

impl From<MethodArg> for Method {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Pearson => Method::Pearson,
            MethodArg::Spearman => Method::Spearman,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TestArg {
    /// Student's t distribution
    #[value(alias = "t")]
    StudentT,
    /// Fisher z transform with a normal approximation
    FisherZ,
}

impl From<TestArg> for SignificanceTest {
    fn from(value: TestArg) -> Self {
        match value {
            TestArg::StudentT => SignificanceTest::StudentT,
            TestArg::FisherZ => SignificanceTest::FisherZ,
        }
    }
}
