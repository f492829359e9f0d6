use std::path::PathBuf;

use clap::Args;
use clinstat_table::{classify::numeric_columns, describe::describe_columns};
use tracing::{info, warn};

use super::shared::{self, CorrelationArg, InputArg};
use crate::{
    report,
    util::{OutputFormat, ReportSink},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    input: InputArg,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Output file path (stdout by default)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let config = shared::load_config(&arg.input, &CorrelationArg::default())?;
    let table = arg.input.read_table()?;

    let columns = numeric_columns(&table, &config.classifier, config.decimal);
    if columns.is_empty() {
        warn!("no numeric columns found");
    }
    let summaries = describe_columns(&columns);
    info!(columns = summaries.len(), "computed descriptive statistics");

    ReportSink::create(arg.output.as_deref())?.emit(arg.format, &summaries, |w| {
        report::write_descriptive(w, table.row_count(), &summaries)
    })
}
