//! Error types for the WTHOR decoder

use std::path::PathBuf;

use thiserror::Error;

pub type WthorResult<T> = Result<T, WthorError>;

#[derive(Error, Debug)]
pub enum WthorError {
    /// A name table or database file could not be opened or read.
    #[error("Missing resource {}: {source}", .path.display())]
    MissingResource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The buffer is too short to hold a database header.
    #[error("Truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    #[error("Unexpected end of data: need {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Invalid name table record width: {0}")]
    InvalidRecordWidth(usize),
}
