//! Locale-aware numeric parsing of raw cells
//!
//! Parsing is total: anything that is not a finite number becomes `None`
//! and is treated downstream as missing data.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::table::Cell;

/// Case-insensitive tokens that mark a missing value.
const MISSING_TOKENS: &[&str] = &["", "-", "na", "n/a"];

/// The decimal separator the caller declares as primary.
///
/// It only matters for cells containing both a comma and a period: the
/// non-primary symbol is then stripped as a thousands separator. A cell with
/// commas and no period always uses the comma as its decimal separator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecimalSeparator {
    /// `1,234.5`
    #[default]
    Period,
    /// `1.234,5`
    Comma,
}

/// Parses a raw cell into a finite number.
///
/// ```
/// use clinstat_table::{
///     parse::{DecimalSeparator, parse_cell},
///     table::Cell,
/// };
///
/// let decimal = DecimalSeparator::Period;
/// assert_eq!(parse_cell(&Cell::from(" 20,5 "), decimal), Some(20.5));
/// assert_eq!(parse_cell(&Cell::from(7.0), decimal), Some(7.0));
/// assert_eq!(parse_cell(&Cell::from("NA"), decimal), None);
/// assert_eq!(parse_cell(&Cell::Empty, decimal), None);
/// ```
#[must_use]
pub fn parse_cell(cell: &Cell, decimal: DecimalSeparator) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(value) => value.is_finite().then_some(*value),
        Cell::Text(text) => parse_number(text, decimal),
    }
}

/// Parses text into a finite number, resolving comma/period ambiguity.
///
/// ```
/// use clinstat_table::parse::{DecimalSeparator, parse_number};
///
/// assert_eq!(parse_number("1,234.5", DecimalSeparator::Period), Some(1234.5));
/// assert_eq!(parse_number("1.234,5", DecimalSeparator::Comma), Some(1234.5));
/// assert_eq!(parse_number("n/a", DecimalSeparator::Period), None);
/// ```
#[must_use]
pub fn parse_number(raw: &str, decimal: DecimalSeparator) -> Option<f64> {
    let text = raw.trim();
    if MISSING_TOKENS
        .iter()
        .any(|token| text.eq_ignore_ascii_case(token))
    {
        return None;
    }

    let has_comma = text.contains(',');
    let has_period = text.contains('.');
    let normalized: Cow<'_, str> = match (has_comma, has_period, decimal) {
        (true, false, _) => text.replace(',', ".").into(),
        (true, true, DecimalSeparator::Period) => text.replace(',', "").into(),
        (true, true, DecimalSeparator::Comma) => text.replace('.', "").replace(',', ".").into(),
        (false, _, _) => text.into(),
    };

    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}
