use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use clinstat_table::{
    analysis::{Analysis, analyze},
    config::AnalysisConfig,
};
use serde::Serialize;
use tracing::info;

use super::shared::{self, CorrelationArg, InputArg};
use crate::util::ReportSink;

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    input: InputArg,

    #[clap(flatten)]
    correlation: CorrelationArg,

    /// Output file path (stdout by default)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    input: &'a Path,
    config: &'a AnalysisConfig,
    #[serde(flatten)]
    analysis: Analysis,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = shared::load_config(&arg.input, &arg.correlation)?;
    let table = arg.input.read_table()?;

    let analysis = analyze(&table, &config);
    info!(
        numeric = analysis.descriptive.len(),
        skipped = analysis.skipped_columns.len(),
        "analysis finished"
    );

    let report = Report {
        generated_at: Utc::now(),
        input: &arg.input.input,
        config: &config,
        analysis,
    };
    ReportSink::create(arg.output.as_deref())?.write_json(&report)
}

#[cfg(test)]
mod tests {
    use clinstat_table::table::{Cell, Table};

    use super::*;

    #[test]
    fn test_report_layout() {
        let table = Table::from_records(
            ["a", "b", "group"],
            [
                ["1", "2", "A"],
                ["2", "4,5", "B"],
                ["3", "5", "A"],
                ["4", "NA", "B"],
            ]
            .map(|row| row.map(Cell::from).to_vec()),
        )
        .unwrap();
        let config = AnalysisConfig::default();
        let report = Report {
            generated_at: Utc::now(),
            input: Path::new("data.csv"),
            config: &config,
            analysis: analyze(&table, &config),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["input"], "data.csv");
        assert_eq!(json["row_count"], 4);
        assert_eq!(json["skipped_columns"], serde_json::json!(["group"]));
        assert_eq!(json["descriptive"][1]["missing"], 1);
        assert_eq!(json["correlation"]["cells"].as_array().unwrap().len(), 2);
        assert_eq!(json["correlation"]["cells"][1][0]["n"], 3);
        assert_eq!(json["config"]["correlation"]["test"], "student-t");
        assert!(json["generated_at"].is_string());
    }
}
