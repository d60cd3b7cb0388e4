//! Tabular formats (CSV, spreadsheets) rendered as an aligned text dump.
//!
//! The dump is meant for a model to read, not for round-tripping:
//!
//! ```text
//!     name  qty
//! 0  apple    3
//! 1   pear   12
//! ```

use std::io::{Cursor, Read};

use calamine::{open_workbook_auto_from_rs, Reader};
use playground_core::DocumentError;

/// A header row plus data rows, all cells already stringified.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV with the first record as the header.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, DocumentError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| DocumentError::Csv(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() {
            return Err(DocumentError::Csv("No columns to parse from file".into()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DocumentError::Csv(e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Read the first worksheet of an `.xlsx`/`.xls` workbook, first row as header.
    pub fn from_workbook(bytes: &[u8]) -> Result<Self, DocumentError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| DocumentError::Spreadsheet(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DocumentError::Spreadsheet("Workbook contains no worksheets".into()))?
            .map_err(|e| DocumentError::Spreadsheet(e.to_string()))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());

        let headers = rows.next().unwrap_or_default();
        Ok(Self {
            headers,
            rows: rows.collect(),
        })
    }

    /// Render with a 0-based index column and right-aligned columns.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return format!("Empty table\nColumns: [{}]", self.headers.join(", "));
        }

        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| cell(row, col).chars().count())
                    .chain(std::iter::once(cell(&self.headers, col).chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);

        let mut header = " ".repeat(index_width);
        for (col, &width) in widths.iter().enumerate() {
            header.push_str(&format!("  {:>width$}", cell(&self.headers, col)));
        }
        lines.push(header);

        for (index, row) in self.rows.iter().enumerate() {
            let mut line = format!("{index:>index_width$}");
            for (col, &width) in widths.iter().enumerate() {
                line.push_str(&format!("  {:>width$}", cell(row, col)));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}
