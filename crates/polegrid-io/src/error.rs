//! Failures at the file boundary: reading requests and CSVs, writing results.

use std::path::PathBuf;
use thiserror::Error;

/// Failures at the file and text boundary.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    #[error("stdout: {0}")]
    Stdout(#[from] std::io::Error),
}

pub type IoResult<T> = Result<T, IoError>;
