//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use fsgate::{BatchStatus, Error as LibError, ErrorKind};
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error outside the confined roots, e.g. reading a local file.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// An upload batch in which no file was written.
    Upload(BatchStatus),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Conflict
    /// - 2: Not found
    /// - 3: Forbidden
    /// - 4: Bad request or invalid arguments
    /// - 5: I/O error
    /// - 6: Internal error
    /// - 7: Configuration error
    /// - 8: Cancelled
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(e) => exit_code_for(e.kind()),
            CliError::Upload(status) => status.error_kind().map_or(0, exit_code_for),
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

fn exit_code_for(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Conflict => 1,
        ErrorKind::NotFound => 2,
        ErrorKind::Forbidden => 3,
        ErrorKind::BadRequest => 4,
        ErrorKind::Internal => 6,
        ErrorKind::Cancelled => 8,
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Upload(status) => match status {
                BatchStatus::Conflict => write!(f, "No file uploaded: every name already exists"),
                BatchStatus::BadRequest => write!(f, "No file uploaded: invalid names or sizes"),
                BatchStatus::Failed => write!(f, "No file uploaded: every write failed"),
                BatchStatus::Created => write!(f, "Upload succeeded"),
            },
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
