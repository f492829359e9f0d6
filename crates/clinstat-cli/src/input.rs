//! Loading tables from disk
//!
//! `.json` files hold an array of row objects; anything else is read as
//! delimited text with a header row.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, bail};
use clinstat_table::table::{Cell, Table};
use tracing::{info, warn};

use crate::util;

pub(crate) fn read_table(path: &Path, delimiter: Option<u8>) -> anyhow::Result<Table> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let table = if is_json {
        util::read_json("table", path)?
    } else {
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open table file: {}", path.display()))?;
        read_delimited(io::BufReader::new(file), delimiter)
            .with_context(|| format!("Failed to read table file: {}", path.display()))?
    };
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.columns().len(),
        "loaded table"
    );
    Ok(table)
}

/// Reads delimited text with a header row.
///
/// Without an explicit delimiter, `;` is used when the text contains
/// semicolons but no commas, or when both occur and the header line splits
/// into more fields on `;` than on `,`. Otherwise `,` is used.
pub(crate) fn read_delimited<R>(mut reader: R, delimiter: Option<u8>) -> anyhow::Result<Table>
where
    R: Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read delimited text")?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&text));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header = reader.headers().context("Failed to read header row")?;
    if header.iter().all(str::is_empty) {
        bail!("Input has no header row");
    }
    let columns = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if name.is_empty() {
                format!("col_{}", i + 1)
            } else {
                name.to_owned()
            }
        })
        .collect::<Vec<_>>();
    let width = columns.len();
    let mut table = Table::new(columns)?;

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse record {}", line + 1))?;
        if record.len() > width {
            warn!(
                record = line + 1,
                fields = record.len(),
                columns = width,
                "dropping fields beyond the header"
            );
        }
        let cells = (0..width)
            .map(|i| match record.get(i) {
                None | Some("") => Cell::Empty,
                Some(value) => Cell::from(value),
            })
            .collect();
        table.push_record(cells)?;
    }
    Ok(table)
}

fn detect_delimiter(text: &str) -> u8 {
    let has_semicolon = text.contains(';');
    let has_comma = text.contains(',');
    if has_semicolon && has_comma {
        let header = text.lines().next().unwrap_or_default();
        if header.split(';').count() > header.split(',').count() {
            b';'
        } else {
            b','
        }
    } else if has_semicolon {
        b';'
    } else {
        b','
    }
}

/// Converts a `--delimiter` argument to the byte the CSV reader expects.
pub(crate) fn delimiter_byte(delimiter: char) -> anyhow::Result<u8> {
    match u8::try_from(delimiter) {
        Ok(byte) if byte.is_ascii() => Ok(byte),
        _ => bail!("Delimiter must be a single ASCII character, got {delimiter:?}"),
    }
}
