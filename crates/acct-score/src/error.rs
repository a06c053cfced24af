use std::path::PathBuf;

use acct_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("select between {min} and {max} criteria, got {count}")]
    CriteriaCount {
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("criterion '{0}' is defined more than once")]
    DuplicateCriterion(String),
    #[error("criterion label '{0}' is used more than once")]
    DuplicateLabel(String),
    #[error("unknown criterion '{0}'")]
    UnknownCriterion(String),
    #[error("no account with id '{0}'")]
    UnknownAccount(String),
    #[error("column '{0}' is not in the account list")]
    MissingColumn(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("invalid scenario: {0}")]
    ScenarioParse(#[from] serde_json::Error),
    #[error("failed to encode export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScoringError>;
