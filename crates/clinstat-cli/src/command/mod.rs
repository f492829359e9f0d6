use clap::{Parser, Subcommand};

use self::{
    analyze::AnalyzeArg, correlate::CorrelateArg, demo::DemoArg, describe::DescribeArg,
};
use crate::logging;

mod analyze;
mod correlate;
mod demo;
mod describe;
mod shared;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print descriptive statistics of every numeric column
    Describe(#[clap(flatten)] DescribeArg),
    /// Print the pairwise correlation matrix of the numeric columns
    Correlate(#[clap(flatten)] CorrelateArg),
    /// Write a full JSON report (descriptive statistics and correlations)
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Generate a synthetic two-class dataset as CSV
    Demo(#[clap(flatten)] DemoArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose);
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Correlate(arg) => correlate::run(&arg)?,
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Demo(arg) => demo::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_correlate() {
        let args = CommandArgs::try_parse_from([
            "clinstat",
            "-vv",
            "correlate",
            "data.csv",
            "--method",
            "spearman",
            "--test",
            "fisher-z",
            "--no-fdr",
            "--decimal",
            "comma",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::Correlate(_)));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(CommandArgs::try_parse_from(["clinstat"]).is_err());
    }
}
