//! Error types for sensordb-store.

use std::path::PathBuf;

/// Result type for sensordb-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sensordb-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite (I/O failure, corruption, permissions).
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A schema migration step could not be applied.
    ///
    /// `source` is `None` when no migration step exists for `from`.
    #[error("Schema migration from version {from} to {to} failed{}", describe_source(.source))]
    Migration {
        from: i32,
        to: i32,
        source: Option<rusqlite::Error>,
    },

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_source(source: &Option<rusqlite::Error>) -> String {
    match source {
        Some(e) => format!(": {e}"),
        None => ": no migration step registered".to_string(),
    }
}
