pub mod csv;

pub use self::csv::{load_csv, parse_catalog, parse_timestamp};

use thiserror::Error;

/// Reasons a catalog fails to load
///
/// Rows with unreadable timestamps are not errors; they are skipped.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The header row lacks a required column
    #[error("missing required column `{0}`")]
    Schema(&'static str),

    /// A numeric field could not be parsed
    #[error("line {line}: invalid {column} value {value:?}")]
    FieldParse {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// A row ends before a required column
    #[error("line {line}: row has no {column} field")]
    MissingField { line: u64, column: &'static str },

    #[error("malformed CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}
