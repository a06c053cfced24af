//! Imported tabular data as seen by the profiler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default number of rows kept from an imported file for analysis.
pub const DEFAULT_SAMPLE_ROWS: usize = 50;

/// A single imported row keyed by header name.
pub type Row = BTreeMap<String, String>;

/// Headers plus a bounded sample of rows from one imported file.
///
/// Rows may omit headers; a missing key reads as an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub sample_rows: Vec<Row>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, sample_rows: Vec<Row>) -> Self {
        Self {
            headers,
            sample_rows,
        }
    }

    /// Builds a table from positional rows, pairing cells with headers by index.
    ///
    /// Short rows are padded with empty values and extra cells are dropped.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let sample_rows = records
            .into_iter()
            .map(|record| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(idx, header)| {
                        let value = record.get(idx).cloned().unwrap_or_default();
                        (header.clone(), value)
                    })
                    .collect()
            })
            .collect();
        Self {
            headers,
            sample_rows,
        }
    }

    /// Value of `header` in `row`, or `""` when the row lacks the key.
    pub fn value<'a>(row: &'a Row, header: &str) -> &'a str {
        row.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.sample_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.sample_rows.is_empty()
    }

    /// Returns a copy keeping only the first `limit` rows.
    #[must_use]
    pub fn sampled(&self, limit: usize) -> Self {
        Self {
            headers: self.headers.clone(),
            sample_rows: self.sample_rows.iter().take(limit).cloned().collect(),
        }
    }
}
