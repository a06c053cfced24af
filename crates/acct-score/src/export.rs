//! Flattened per-account export in delimited text form.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use acct_model::{AccountRecord, Criterion, Tier};
use serde::Serialize;
use tracing::info;

use crate::engine::ScoringEngine;
use crate::error::{Result, ScoringError};

/// Columns preceding the per-criterion point columns.
pub const FIXED_COLUMNS: [&str; 4] = ["AccountID", "AccountName", "TotalScore", "Tier"];

/// One exported account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub account_id: String,
    pub account_name: String,
    pub total_score: u32,
    pub tier: Tier,
    /// Points per criterion, in criteria order. Unscored criteria are 0.
    pub criterion_points: Vec<u32>,
}

impl ExportRow {
    fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.account_id.clone(),
            self.account_name.clone(),
            self.total_score.to_string(),
            self.tier.to_string(),
        ];
        record.extend(self.criterion_points.iter().map(u32::to_string));
        record
    }
}

/// Header row: the fixed columns followed by each criterion label.
pub fn export_header(criteria: &[Criterion]) -> Vec<String> {
    FIXED_COLUMNS
        .iter()
        .map(|column| (*column).to_string())
        .chain(criteria.iter().map(|criterion| criterion.label.clone()))
        .collect()
}

pub fn export_rows(accounts: &[AccountRecord], criteria: &[Criterion]) -> Vec<ExportRow> {
    let engine = ScoringEngine::new(criteria);
    accounts
        .iter()
        .map(|account| {
            let result = engine.score(account);
            ExportRow {
                account_id: account.id.clone(),
                account_name: account.name.clone(),
                total_score: result.total_score,
                tier: result.tier,
                criterion_points: criteria
                    .iter()
                    .map(|criterion| {
                        account
                            .level(&criterion.id)
                            .map_or(0, |level| criterion.points(level))
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Writes the header and one record per account to `writer`.
pub fn write_export<W: Write>(
    writer: W,
    accounts: &[AccountRecord],
    criteria: &[Criterion],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(export_header(criteria))?;
    for row in export_rows(accounts, criteria) {
        csv_writer.write_record(row.to_record())?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_to_string(accounts: &[AccountRecord], criteria: &[Criterion]) -> Result<String> {
    let mut buffer = Vec::new();
    write_export(&mut buffer, accounts, criteria)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes the export to `path`, creating missing parent directories.
pub fn write_export_file(
    path: &Path,
    accounts: &[AccountRecord],
    criteria: &[Criterion],
) -> Result<()> {
    let io_error = |source| ScoringError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(path).map_err(io_error)?;
    write_export(file, accounts, criteria)?;
    info!(path = %path.display(), accounts = accounts.len(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use acct_model::Level;

    #[test]
    fn unscored_criteria_export_zero() {
        let criteria = vec![Criterion::new("fit", "Fit"), Criterion::new("budget", "Budget")];
        let mut account = AccountRecord::new("1", "Acme").with_criteria(&criteria);
        account.set_level("budget", Some(Level::Medium));

        let rows = export_rows(&[account], &criteria);
        assert_eq!(rows[0].criterion_points, vec![0, 30]);
        assert_eq!(rows[0].total_score, 30);
        assert_eq!(rows[0].tier, Tier::Low);
        assert_eq!(
            export_header(&criteria),
            vec!["AccountID", "AccountName", "TotalScore", "Tier", "Fit", "Budget"]
        );
    }
}
