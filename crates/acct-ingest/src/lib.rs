//! Account list ingestion: delimited file loading and column profiling.

pub mod csv_table;
pub mod error;
pub mod profiler;
pub mod quality;

pub use csv_table::{
    IngestOptions, load_accounts_table, parse_raw_table, read_raw_table, read_raw_table_with_options,
};
pub use error::{IngestError, Result};
pub use profiler::{profile, profile_column};
pub use quality::{MISSING_VALUE_WARNING_RATIO, QualityWarning, quality_warnings};
