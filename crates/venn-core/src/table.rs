//! In-memory table model and delimited-text reader.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::errors::{ErrorInfo, VennError};

/// Read-only view over a header plus rows of raw cell literals.
pub trait TableReader {
    /// Column names in their original left-to-right order.
    fn column_names(&self) -> &[String];

    /// Number of data rows (the header is not counted).
    fn row_count(&self) -> usize;

    /// Raw literal stored at `row` under `column`, if both exist.
    fn cell_value(&self, row: usize, column: &str) -> Option<&str>;
}

/// Options controlling how delimited text is parsed into a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter byte; tab for the TSV summaries produced by VCF comparisons.
    pub delimiter: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { delimiter: b'\t' }
    }
}

/// Owned table of string cells with a unique header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    index: BTreeMap<String, usize>,
    rows: Vec<Vec<String>>,
}

fn table_error(code: &str, message: impl Into<String>) -> VennError {
    VennError::Table(ErrorInfo::new(code, message))
}

impl Table {
    /// Builds a table from a header and rows, checking header uniqueness and row width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, VennError> {
        let mut index = BTreeMap::new();
        for (idx, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), idx).is_some() {
                return Err(VennError::Table(
                    ErrorInfo::new("venn_core.duplicate_column", "header repeats a column name")
                        .with_context("column", name.clone()),
                ));
            }
        }
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(VennError::Table(
                    ErrorInfo::new("venn_core.row_width", "row width differs from header")
                        .with_context("row", row_idx.to_string())
                        .with_context("expected", columns.len().to_string())
                        .with_context("observed", row.len().to_string()),
                ));
            }
        }
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Parses delimited text with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R, opts: &ReadOptions) -> Result<Self, VennError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(opts.delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let columns: Vec<String> = rdr
            .headers()
            .map_err(|err| table_error("venn_core.header", err.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if columns.iter().all(|name| name.is_empty()) {
            return Err(table_error("venn_core.header", "input has no header row"));
        }
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|err| table_error("venn_core.record", err.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        let table = Self::new(columns, rows)?;
        debug!(
            columns = table.columns.len(),
            rows = table.rows.len(),
            "parsed delimited table"
        );
        Ok(table)
    }

    /// Opens and parses the delimited file at `path`.
    pub fn from_path(path: &Path, opts: &ReadOptions) -> Result<Self, VennError> {
        let file = File::open(path).map_err(|err| {
            VennError::Table(
                ErrorInfo::new("venn_core.open", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_reader(file, opts)
    }

    /// Position of `column` in the header.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }
}

impl TableReader for Table {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|cells| cells[col].as_str())
    }
}

/// Interprets a raw literal as a membership flag.
///
/// `0`/`1` is the reference encoding; `true`/`false` in any case are accepted.
/// Everything else, including blank cells, is not a boolean.
pub fn parse_indicator(literal: &str) -> Option<bool> {
    match literal.trim() {
        "1" => Some(true),
        "0" => Some(false),
        other if other.eq_ignore_ascii_case("true") => Some(true),
        other if other.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}
