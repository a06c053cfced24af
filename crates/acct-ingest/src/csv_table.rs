//! Delimited file loading into a [`RawTable`].

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use acct_model::{DEFAULT_SAMPLE_ROWS, RawTable};
use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Options controlling how an account list is read.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Maximum number of data rows to keep (`None` keeps every row).
    pub row_limit: Option<usize>,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            row_limit: Some(DEFAULT_SAMPLE_ROWS),
            delimiter: b',',
        }
    }
}

impl IngestOptions {
    /// Options that keep every data row, used when building accounts.
    #[must_use]
    pub fn all_rows() -> Self {
        Self {
            row_limit: None,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Makes repeated header names distinct by appending `_2`, `_3`, ...
///
/// A suffix is skipped when that name is already taken by another header.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: BTreeSet<String> = headers.iter().cloned().collect();
    let mut emitted: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        if emitted.insert(header.clone()) {
            out.push(header);
            continue;
        }
        let renamed = (2usize..)
            .map(|suffix| format!("{header}_{suffix}"))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| header.clone());
        warn!(header = %header, renamed = %renamed, "duplicate header renamed");
        taken.insert(renamed.clone());
        emitted.insert(renamed.clone());
        out.push(renamed);
    }
    out
}

/// Reads a delimited account list from `path` using the default sample size.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    read_raw_table_with_options(path, IngestOptions::default())
}

/// Reads every row of an account list, for building accounts after the
/// columns have been mapped.
pub fn load_accounts_table(path: &Path) -> Result<RawTable> {
    read_raw_table_with_options(path, IngestOptions::all_rows())
}

/// Reads a delimited account list from `path`.
pub fn read_raw_table_with_options(path: &Path, options: IngestOptions) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_raw_table(file, options).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        headers = table.headers.len(),
        rows = table.row_count(),
        "account list loaded"
    );
    Ok(table)
}

/// Parses delimited content from any reader.
///
/// The first non-blank record is the header row. Blank records are skipped,
/// short records are padded with empty values.
pub fn parse_raw_table<R: Read>(
    reader: R,
    options: IngestOptions,
) -> std::result::Result<RawTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);
    let mut headers: Option<Vec<String>> = None;
    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        if headers.is_none() {
            headers = Some(dedupe_headers(
                record.iter().map(normalize_header).collect(),
            ));
            continue;
        }
        if options.row_limit.is_some_and(|limit| records.len() >= limit) {
            break;
        }
        records.push(row);
    }
    Ok(RawTable::from_records(headers.unwrap_or_default(), records))
}
