//! Synthetic demo dataset
//!
//! Two classes of equal size with well-separated urine marker levels, so the
//! correlation matrix shows strong structure between the marker columns and
//! none with the independent ones.

use std::{io, path::PathBuf};

use clap::Args;
use rand::{Rng, SeedableRng as _};
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::info;

use crate::util::ReportSink;

#[derive(Debug, Clone, Args)]
pub(crate) struct DemoArg {
    /// Number of rows to generate (half per class)
    #[arg(long, default_value_t = 80)]
    rows: usize,

    /// Random seed (random by default; the seed used is logged at info level)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path (stdout by default)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Column names of [`DemoRecord`], written even when there are no rows.
const HEADER: [&str; 10] = [
    "ID", "sex", "age", "uUmod", "uUmod24", "uAlb", "uCrea", "ScoreX", "ScoreY", "class",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
struct DemoRecord {
    #[serde(rename = "ID")]
    id: usize,
    sex: u8,
    age: f64,
    #[serde(rename = "uUmod")]
    u_umod: f64,
    #[serde(rename = "uUmod24")]
    u_umod_24: f64,
    #[serde(rename = "uAlb")]
    u_alb: f64,
    #[serde(rename = "uCrea")]
    u_crea: f64,
    #[serde(rename = "ScoreX")]
    score_x: f64,
    #[serde(rename = "ScoreY")]
    score_y: f64,
    class: &'static str,
}

fn gauss<R>(rng: &mut R, mean: f64, sd: f64) -> f64
where
    R: Rng,
{
    mean + sd * rng.sample::<f64, _>(StandardNormal)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn generate<R>(rows: usize, rng: &mut R) -> Vec<DemoRecord>
where
    R: Rng,
{
    (0..rows)
        .map(|i| {
            let is_a = i < rows / 2;
            let x = if is_a {
                gauss(rng, 8.0, 1.0)
            } else {
                gauss(rng, 30.0, 1.2)
            };
            let y = if is_a {
                gauss(rng, 5.0, 0.8)
            } else {
                gauss(rng, 11.0, 1.1)
            };
            let u_alb = gauss(rng, 22.0, 6.0).abs();
            let u_crea = gauss(rng, 8.0, 5.0).abs();
            DemoRecord {
                id: i + 1,
                sex: u8::from(i % 2 == 1),
                age: gauss(rng, 32.0, 7.0).abs().round(),
                u_umod: round2(x),
                u_umod_24: round2((x * 2.2).abs()),
                u_alb: round2(u_alb),
                u_crea: round2(u_crea),
                score_x: round2(x + gauss(rng, 0.0, 1.0)),
                score_y: round2(y + gauss(rng, 0.0, 1.0)),
                class: if is_a { "A" } else { "B" },
            }
        })
        .collect()
}

fn write_csv<W>(writer: W, records: &[DemoRecord]) -> csv::Result<()>
where
    W: io::Write,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn run(arg: &DemoArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, rows = arg.rows, "generating demo data");
    let mut rng = Pcg32::seed_from_u64(seed);
    let records = generate(arg.rows, &mut rng);

    ReportSink::create(arg.output.as_deref())?.write_with(|w| Ok(write_csv(w, &records)?))
}
