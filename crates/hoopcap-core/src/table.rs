// In-memory CSV table with loosely structured columns.
//
// Inputs come from hand-maintained spreadsheets, so nothing about the header
// set is assumed here: columns are looked up by name later, rows are padded
// to the header width, and placeholder cells read as missing.

use crate::error::PipelineError;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Cell contents treated as a missing value (compared after trimming).
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "#N/A", "NaN", "nan", "NULL", "null", "None",
];

/// Returns true if a raw cell holds no value.
pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value.trim())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell at `col`, or `None` when the cell is missing.
    pub fn get(&self, col: usize) -> Option<&'a str> {
        self.cells
            .get(col)
            .map(String::as_str)
            .filter(|v| !is_missing(v))
    }

    /// Optional column lookup: `None` column index reads as a missing cell.
    pub fn get_opt(&self, col: Option<usize>) -> Option<&'a str> {
        col.and_then(|c| self.get(c))
    }
}

impl Table {
    /// Build a table from headers and rows. Rows are padded or truncated to
    /// the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Table { headers, rows }
    }

    /// Parse a table from any CSV reader. Header names are trimmed; rows that
    /// cannot be decoded are skipped with a warning.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            match result {
                Ok(record) => {
                    if record.len() > headers.len() {
                        warn!(
                            "row {} has {} cells but only {} columns; extra cells dropped",
                            idx + 1,
                            record.len(),
                            headers.len()
                        );
                    }
                    rows.push(record.iter().map(str::to_string).collect());
                }
                Err(e) => {
                    warn!("skipping malformed row {}: {}", idx + 1, e);
                }
            }
        }
        Ok(Table::new(headers, rows))
    }

    /// Read a whole CSV file into memory.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let file = std::fs::File::open(path).map_err(|e| PipelineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Table::from_reader(file).map_err(|e| PipelineError::Csv {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row(&self, idx: usize) -> Option<Row<'_>> {
        self.rows.get(idx).map(|cells| Row { cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(|cells| Row { cells })
    }
}
