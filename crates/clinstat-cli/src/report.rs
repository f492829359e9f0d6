//! Plain-text tables
//!
//! Every function writes to an `io::Write` so the same layout serves stdout
//! and `--output` files.

use std::io::{self, Write};

use clinstat_table::{
    describe::ColumnSummary,
    matrix::{CorrelationCell, CorrelationMatrix},
};

const LABEL_WIDTH: usize = 20;
const GRID_WIDTH: usize = 10;

fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "N/A".to_string()
    } else {
        format!("{value:.precision$}")
    }
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_owned()
    } else {
        let mut short = label.chars().take(width - 1).collect::<String>();
        short.push('~');
        short
    }
}

pub(crate) fn write_descriptive<W>(
    w: &mut W,
    row_count: usize,
    summaries: &[ColumnSummary],
) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        w,
        "Descriptive Statistics ({row_count} rows, {} numeric columns)",
        summaries.len()
    )?;
    writeln!(w)?;
    writeln!(
        w,
        "  {:<LABEL_WIDTH$} {:>6} {:>9} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Column", "N", "Missing%", "Mean", "SD", "Min", "Q1", "Median", "Q3", "Max",
    )?;
    // label(20) + n(6) + missing(9) + 7 * value(10) + spaces(9)
    writeln!(w, "  {}", "-".repeat(LABEL_WIDTH + 6 + 9 + 7 * 10 + 9))?;
    for summary in summaries {
        let stats = &summary.stats;
        writeln!(
            w,
            "  {:<LABEL_WIDTH$} {:>6} {:>8.1}% {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            truncate(&summary.name, LABEL_WIDTH),
            stats.n,
            summary.missing_pct,
            format_value(stats.mean, 3),
            format_value(stats.sd, 3),
            format_value(stats.min, 3),
            format_value(stats.q1, 3),
            format_value(stats.median, 3),
            format_value(stats.q3, 3),
            format_value(stats.max, 3),
        )?;
    }
    Ok(())
}

fn grid_entry(cell: &CorrelationCell, alpha: f64) -> String {
    if cell.r.is_nan() {
        "N/A".to_string()
    } else {
        format!("{:.2}{}", cell.r, cell.stars(alpha))
    }
}

pub(crate) fn write_matrix<W>(w: &mut W, matrix: &CorrelationMatrix) -> io::Result<()>
where
    W: Write,
{
    let alpha = matrix.alpha();
    writeln!(
        w,
        "Correlation Matrix (method={:?}, test={:?}, fdr={})",
        matrix.method(),
        matrix.test(),
        if matrix.use_fdr() { "on" } else { "off" },
    )?;
    writeln!(w)?;

    write!(w, "  {:<LABEL_WIDTH$}", "")?;
    for name in matrix.columns() {
        write!(w, " {:>GRID_WIDTH$}", truncate(name, GRID_WIDTH))?;
    }
    writeln!(w)?;
    for (i, name) in matrix.columns().iter().enumerate() {
        write!(w, "  {:<LABEL_WIDTH$}", truncate(name, LABEL_WIDTH))?;
        for cell in matrix.row(i).unwrap_or_default() {
            write!(w, " {:>GRID_WIDTH$}", grid_entry(cell, alpha))?;
        }
        writeln!(w)?;
    }
    writeln!(w)?;

    let mut significant = matrix
        .upper_triangle()
        .filter(|(_, _, cell)| cell.p < alpha)
        .collect::<Vec<_>>();
    significant.sort_by(|a, b| a.2.p.total_cmp(&b.2.p));

    writeln!(w, "Significant pairs (p < {alpha})")?;
    if significant.is_empty() {
        writeln!(w, "  (none)")?;
        return Ok(());
    }
    writeln!(
        w,
        "  {:<LABEL_WIDTH$} {:<LABEL_WIDTH$} {:>8} {:>10} {:>10} {:>6}",
        "X", "Y", "r", "p", "q", "n",
    )?;
    // 2 * label(20) + r(8) + p(10) + q(10) + n(6) + spaces(5)
    writeln!(w, "  {}", "-".repeat(2 * LABEL_WIDTH + 8 + 10 + 10 + 6 + 5))?;
    for (x, y, cell) in significant {
        writeln!(
            w,
            "  {:<LABEL_WIDTH$} {:<LABEL_WIDTH$} {:>8} {:>10} {:>10} {:>6}",
            truncate(x, LABEL_WIDTH),
            truncate(y, LABEL_WIDTH),
            format_value(cell.r, 3),
            format_p(cell.p),
            format_p(cell.q),
            cell.n,
        )?;
    }
    writeln!(w)?;
    print_legend(w, alpha)
}

fn format_p(p: f64) -> String {
    if p.is_nan() {
        "N/A".to_string()
    } else if p < 1e-4 {
        format!("{p:.2e}")
    } else {
        format!("{p:.4}")
    }
}

fn print_legend<W>(w: &mut W, alpha: f64) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Legend:")?;
    writeln!(w, "  ***/**/*  : p < 0.001 / p < 0.01 / p < {alpha}")?;
    writeln!(w, "  q         : Benjamini-Hochberg adjusted p-value (N/A when disabled)")?;
    writeln!(w, "  N/A       : Too few complete pairs or constant data")
}
