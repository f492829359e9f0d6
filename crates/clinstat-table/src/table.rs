//! Table data model
//!
//! A [`Table`] is an ordered list of column names plus an ordered list of
//! rows. Cells are stored positionally (aligned with the column list) so that
//! row order is preserved across every column, but rows can be added and read
//! by column name the same way as the row objects produced by a spreadsheet
//! reader.
//!
//! # Serialization
//!
//! A table (de)serializes as an array of row objects. Column order follows
//! the first appearance of each key, and keys missing from a row read as
//! [`Cell::Empty`]:
//!
//! ```json
//! [
//!   { "id": 1, "eGFR": "61,5", "stage": "G2" },
//!   { "id": 2, "eGFR": null, "stage": "G3a" }
//! ]
//! ```

use std::{collections::HashMap, fmt};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap as _, SerializeSeq as _},
};

/// A single raw table cell.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Cell {
    /// No value.
    #[default]
    Empty,
    /// Text as entered, possibly numeric-looking (`"12,5"`, `"NA"`, `"male"`).
    Text(String),
    /// A value that is already numeric.
    Number(f64),
}

impl Cell {
    /// Returns `true` for [`Cell::Empty`] and for text that is blank after
    /// trimming.
    ///
    /// ```
    /// use clinstat_table::table::Cell;
    ///
    /// assert!(Cell::Empty.is_blank());
    /// assert!(Cell::from("   ").is_blank());
    /// assert!(!Cell::from("NA").is_blank());
    /// assert!(!Cell::from(0.0).is_blank());
    /// ```
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => f.write_str(text),
            Cell::Number(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Text(text) => serializer.serialize_str(text),
            Cell::Number(value) => serializer.serialize_f64(*value),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellVisitor)
    }
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a number, a string or a boolean")
    }

    fn visit_unit<E>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }

    fn visit_none<E>(self) -> Result<Cell, E> {
        Ok(Cell::Empty)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Cell, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Cell, E> {
        Ok(Cell::Text(value.to_string()))
    }

    #[expect(clippy::cast_precision_loss)]
    fn visit_i64<E>(self, value: i64) -> Result<Cell, E> {
        Ok(Cell::Number(value as f64))
    }

    #[expect(clippy::cast_precision_loss)]
    fn visit_u64<E>(self, value: u64) -> Result<Cell, E> {
        Ok(Cell::Number(value as f64))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Cell, E> {
        Ok(Cell::Number(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Cell, E> {
        Ok(Cell::from(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Cell, E> {
        Ok(Cell::Text(value))
    }
}

/// Errors raised while building a [`Table`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("duplicate column name '{name}'")]
    DuplicateColumn { name: String },
    #[display("unknown column '{name}'")]
    UnknownColumn { name: String },
    #[display("record has {actual} cells but the table has {expected} columns")]
    RecordLength { expected: usize, actual: usize },
}

/// An ordered collection of rows sharing a set of named columns.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if a name appears twice.
    pub fn new<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for name in columns {
            table.add_column(name.into())?;
        }
        Ok(table)
    }

    /// Builds a table from a header and positional records.
    ///
    /// ```
    /// use clinstat_table::table::{Cell, Table};
    ///
    /// let table = Table::from_records(
    ///     ["age", "sex"],
    ///     [vec![Cell::from(54.0), Cell::from("F")], vec![Cell::Empty, Cell::from("M")]],
    /// )
    /// .unwrap();
    /// assert_eq!(table.row_count(), 2);
    /// assert_eq!(table.cell(1, "sex"), Some(&Cell::from("M")));
    /// ```
    pub fn from_records<I, S, R>(columns: I, records: R) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<Cell>>,
    {
        let mut table = Self::new(columns)?;
        for record in records {
            table.push_record(record)?;
        }
        Ok(table)
    }

    /// Builds a table from row objects given as ordered `(name, cell)` pairs.
    ///
    /// Columns are created in order of first appearance; earlier rows are
    /// back-filled with [`Cell::Empty`] for columns introduced later.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateColumn`] if a row repeats a name.
    pub fn from_rows<R, C>(rows: R) -> Result<Self, TableError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = (String, Cell)>,
    {
        let mut table = Self::default();
        for row in rows {
            let mut record = vec![Cell::Empty; table.columns.len()];
            let mut seen = vec![false; table.columns.len()];
            for (name, cell) in row {
                let position = match table.index.get(&name) {
                    Some(&position) => position,
                    None => {
                        let position = table.add_column(name.clone())?;
                        record.push(Cell::Empty);
                        seen.push(false);
                        position
                    }
                };
                if seen[position] {
                    return Err(TableError::DuplicateColumn { name });
                }
                seen[position] = true;
                record[position] = cell;
            }
            table.rows.push(record);
        }
        Ok(table)
    }

    fn add_column(&mut self, name: String) -> Result<usize, TableError> {
        if self.index.contains_key(&name) {
            return Err(TableError::DuplicateColumn { name });
        }
        let position = self.columns.len();
        self.index.insert(name.clone(), position);
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(Cell::Empty);
        }
        Ok(position)
    }

    /// Appends a positional record. Its length must match the column count.
    pub fn push_record(&mut self, record: Vec<Cell>) -> Result<(), TableError> {
        if record.len() != self.columns.len() {
            return Err(TableError::RecordLength {
                expected: self.columns.len(),
                actual: record.len(),
            });
        }
        self.rows.push(record);
        Ok(())
    }

    /// Appends a row given by column name. Columns not mentioned are empty.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if a name is not a column of
    /// this table.
    pub fn push_row<R, S>(&mut self, row: R) -> Result<(), TableError>
    where
        R: IntoIterator<Item = (S, Cell)>,
        S: AsRef<str>,
    {
        let mut record = vec![Cell::Empty; self.columns.len()];
        for (name, cell) in row {
            let name = name.as_ref();
            let position = self
                .column_index(name)
                .ok_or_else(|| TableError::UnknownColumn {
                    name: name.to_owned(),
                })?;
            record[position] = cell;
        }
        self.rows.push(record);
        Ok(())
    }

    /// Column names in table order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` in column `name`, or `None` if either is out of range.
    #[must_use]
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let position = self.column_index(name)?;
        self.rows.get(row).map(|record| &record[position])
    }

    /// Cells of one column in row order, or `None` for an unknown column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        let position = self.column_index(name)?;
        Some(self.rows.iter().map(move |record| &record[position]))
    }

    /// Rows as positional records aligned with [`Table::columns`].
    pub fn records(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for record in &self.rows {
            seq.serialize_element(&RowObject {
                columns: &self.columns,
                record,
            })?;
        }
        seq.end()
    }
}

struct RowObject<'a> {
    columns: &'a [String],
    record: &'a [Cell],
}

impl Serialize for RowObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in self.columns.iter().zip(self.record) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = deserializer.deserialize_seq(RowsVisitor)?;
        Table::from_rows(rows).map_err(de::Error::custom)
    }
}

struct RowsVisitor;

impl<'de> Visitor<'de> for RowsVisitor {
    type Value = Vec<Vec<(String, Cell)>>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of row objects")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut rows = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(OrderedRow(row)) = seq.next_element()? {
            rows.push(row);
        }
        Ok(rows)
    }
}

/// A row object whose entries keep their document order.
struct OrderedRow(Vec<(String, Cell)>);

impl<'de> Deserialize<'de> for OrderedRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedRowVisitor)
    }
}

struct OrderedRowVisitor;

impl<'de> Visitor<'de> for OrderedRowVisitor {
    type Value = OrderedRow;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a row object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Cell>()? {
            entries.push(entry);
        }
        Ok(OrderedRow(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::from_records(
            ["id", "creatinine", "stage"],
            [
                vec![Cell::from(1.0), Cell::from("1,2"), Cell::from("G2")],
                vec![Cell::from(2.0), Cell::Empty, Cell::from("G3a")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_column_is_rejected() {
        let err = Table::new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { ref name } if name == "a"));
        assert_eq!(err.to_string(), "duplicate column name 'a'");
    }

    #[test]
    fn test_record_length_is_checked() {
        let mut table = Table::new(["a", "b"]).unwrap();
        let err = table.push_record(vec![Cell::Empty]).unwrap_err();
        assert!(matches!(
            err,
            TableError::RecordLength {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_push_row_by_name() {
        let mut table = Table::new(["a", "b"]).unwrap();
        table.push_row([("b", Cell::from(2.0))]).unwrap();
        assert_eq!(table.cell(0, "a"), Some(&Cell::Empty));
        assert_eq!(table.cell(0, "b"), Some(&Cell::Number(2.0)));

        let err = table.push_row([("c", Cell::Empty)]).unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn { .. }));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_column_access() {
        let table = sample_table();
        let stages = table.column("stage").unwrap().cloned().collect::<Vec<_>>();
        assert_eq!(stages, vec![Cell::from("G2"), Cell::from("G3a")]);
        assert!(table.column("missing").is_none());
        assert_eq!(table.cell(5, "id"), None);
    }

    #[test]
    fn test_from_rows_backfills_new_columns() {
        let table = Table::from_rows([
            vec![("a".to_owned(), Cell::from(1.0))],
            vec![
                ("b".to_owned(), Cell::from("x")),
                ("a".to_owned(), Cell::from(2.0)),
            ],
        ])
        .unwrap();
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(table.cell(0, "b"), Some(&Cell::Empty));
        assert_eq!(table.cell(1, "a"), Some(&Cell::Number(2.0)));
    }

    #[test]
    fn test_from_rows_rejects_repeated_key() {
        let err = Table::from_rows([vec![
            ("a".to_owned(), Cell::from(1.0)),
            ("a".to_owned(), Cell::from(2.0)),
        ]])
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let json = r#"[
            {"zeta": 1, "alpha": "2,5", "flag": true},
            {"alpha": null, "zeta": -3.5, "extra": "NA"}
        ]"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.columns(), ["zeta", "alpha", "flag", "extra"]);
        assert_eq!(table.cell(0, "zeta"), Some(&Cell::Number(1.0)));
        assert_eq!(table.cell(0, "alpha"), Some(&Cell::from("2,5")));
        assert_eq!(table.cell(0, "flag"), Some(&Cell::from("true")));
        assert_eq!(table.cell(0, "extra"), Some(&Cell::Empty));
        assert_eq!(table.cell(1, "alpha"), Some(&Cell::Empty));
        assert_eq!(table.cell(1, "zeta"), Some(&Cell::Number(-3.5)));
    }

    #[test]
    fn test_serialize_as_row_objects() {
        let json = serde_json::to_value(sample_table()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1.0, "creatinine": "1,2", "stage": "G2"},
                {"id": 2.0, "creatinine": null, "stage": "G3a"}
            ])
        );
    }
}
