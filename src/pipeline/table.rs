//! CSV ingestion and the dynamic batch table.
//!
//! Uploaded tables arrive with no declared schema, so the required columns
//! are validated by name at this boundary before any derived-field
//! computation or prediction runs. Extra columns are carried through
//! untouched.

use std::io;
use std::path::Path;
use std::str::FromStr;

use super::PipelineError;
use super::features::RawOrder;

/// Column holding the ordered quantity.
pub const QUANTITY_COLUMN: &str = "QUANTITYORDERED";
/// Column holding the per-unit price.
pub const PRICE_COLUMN: &str = "PRICEEACH";
/// Column holding the day of the month.
pub const DAY_COLUMN: &str = "DAY";
/// Column holding the weekday (0=Monday..6=Sunday).
pub const WEEKDAY_COLUMN: &str = "WEEKDAY";

/// Columns a batch table must provide, by exact name.
pub const REQUIRED_COLUMNS: [&str; 4] =
    [QUANTITY_COLUMN, PRICE_COLUMN, DAY_COLUMN, WEEKDAY_COLUMN];

/// An in-memory CSV table: one header row plus data rows of string cells.
///
/// Cells stay strings so original column values pass through to the output
/// byte-identical; only the required columns are ever parsed as numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl BatchTable {
    pub(crate) fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a table from any CSV source. The whole table is loaded into
    /// memory; there is no streaming path.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, PipelineError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader
            .headers()?
            .iter()
            .map(|cell| cell.to_string())
            .collect();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        Ok(Self { headers, rows })
    }

    /// Read a table from a CSV file on disk.
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by exact, case-sensitive name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Validate the required schema and parse every row into a [`RawOrder`].
    ///
    /// All missing required columns are reported together. Output order
    /// matches row order and no row is filtered.
    pub fn orders(&self) -> Result<Vec<RawOrder>, PipelineError> {
        let [quantity_idx, price_idx, day_idx, weekday_idx] = self.required_column_indices()?;
        let mut orders = Vec::with_capacity(self.rows.len());
        for (row_idx, row) in self.rows.iter().enumerate() {
            orders.push(RawOrder {
                quantity: parse_cell(row, row_idx, quantity_idx, QUANTITY_COLUMN)?,
                unit_price: parse_cell(row, row_idx, price_idx, PRICE_COLUMN)?,
                day_of_month: parse_cell(row, row_idx, day_idx, DAY_COLUMN)?,
                weekday: parse_cell(row, row_idx, weekday_idx, WEEKDAY_COLUMN)?,
            });
        }
        Ok(orders)
    }

    fn required_column_indices(&self) -> Result<[usize; 4], PipelineError> {
        let mut missing = Vec::new();
        let mut indices = [0usize; 4];
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            match self.column_index(name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(PipelineError::InputSchema { missing });
        }
        Ok(indices)
    }
}

/// Parse one required cell, naming the row (1-based, header excluded) and
/// column on failure. Surrounding whitespace is tolerated.
fn parse_cell<T: FromStr>(
    row: &[String],
    row_idx: usize,
    column_idx: usize,
    column: &str,
) -> Result<T, PipelineError> {
    let raw = row.get(column_idx).map(String::as_str).unwrap_or("");
    raw.trim()
        .parse()
        .map_err(|_| PipelineError::InvalidValue {
            row: row_idx + 1,
            column: column.to_string(),
            value: raw.to_string(),
        })
}
