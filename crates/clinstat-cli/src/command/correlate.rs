use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use clinstat_table::{classify::numeric_columns, matrix::CorrelationMatrix};
use tracing::{info, warn};

use super::shared::{self, CorrelationArg, InputArg};
use crate::{
    report,
    util::{OutputFormat, ReportSink},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CorrelateArg {
    #[clap(flatten)]
    input: InputArg,

    #[clap(flatten)]
    correlation: CorrelationArg,

    /// Maximum number of numeric columns to correlate, in table order
    #[arg(long, default_value_t = 40)]
    max_columns: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Output file path (stdout by default)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CorrelateArg) -> anyhow::Result<()> {
    let config = shared::load_config(&arg.input, &arg.correlation)?;
    let table = arg.input.read_table()?;

    let mut columns = numeric_columns(&table, &config.classifier, config.decimal);
    if columns.is_empty() {
        bail!("No numeric columns found in {}", arg.input.input.display());
    }
    if columns.len() > arg.max_columns {
        warn!(
            found = columns.len(),
            kept = arg.max_columns,
            "too many numeric columns, correlating the first ones only"
        );
        columns.truncate(arg.max_columns);
    }

    info!(columns = columns.len(), "computing correlation matrix");
    let matrix = CorrelationMatrix::compute(&columns, table.row_count(), &config.correlation);

    ReportSink::create(arg.output.as_deref())?.emit(arg.format, &matrix, |w| {
        report::write_matrix(w, &matrix)
    })
}
