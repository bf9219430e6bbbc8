//! Error types for the fsgate library.
//!
//! Every filesystem-facing operation returns a typed [`Error`] whose
//! [`ErrorKind`] is drawn from a small closed taxonomy. Transports map the
//! kind to their own status codes; the message is safe to show to callers.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for operations that may fail with an fsgate error.
///
/// # Examples
///
/// ```
/// use fsgate::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("docs/a.txt")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of failure kinds an operation can report.
///
/// # Examples
///
/// ```
/// use fsgate::{Error, ErrorKind};
///
/// let err = Error::conflict("destination already exists");
/// assert_eq!(err.kind(), ErrorKind::Conflict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed virtual path or simple name.
    BadRequest,
    /// Root protection, symlinked ancestor, or permission denial.
    Forbidden,
    /// Source, parent, or link does not exist.
    NotFound,
    /// Destination exists, directory not empty, or mismatched share link.
    Conflict,
    /// Unexpected filesystem failure.
    Internal,
    /// The caller cancelled the request before work began.
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Internal => write!(f, "internal"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The main error type for the fsgate library.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was malformed.
    #[error("bad request: {message}")]
    BadRequest {
        /// Description of what was wrong with the request.
        message: String,
    },

    /// The request targets something the caller may not touch.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Description of the refusal.
        message: String,
    },

    /// A required path does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Description of what is missing.
        message: String,
    },

    /// The operation conflicts with the current filesystem state.
    #[error("conflict: {message}")]
    Conflict {
        /// Description of the conflict.
        message: String,
    },

    /// An unexpected OS-level failure. The OS error is only reachable
    /// through [`std::error::Error::source`].
    #[error("internal error: {context}")]
    Internal {
        /// Operation context, without OS error text.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Builds a [`Error::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Builds a [`Error::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Builds a [`Error::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Builds a [`Error::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Builds a [`Error::Internal`] wrapping an I/O error.
    pub fn internal(context: impl Into<String>, source: io::Error) -> Self {
        Self::Internal {
            context: context.into(),
            source,
        }
    }

    /// Returns the failure kind of this error.
    ///
    /// Configuration and validation errors report [`ErrorKind::BadRequest`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fsgate::{Error, ErrorKind};
    ///
    /// assert_eq!(Error::not_found("x").kind(), ErrorKind::NotFound);
    /// assert_eq!(Error::Cancelled.kind(), ErrorKind::Cancelled);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { .. } | Self::Configuration(_) | Self::Validation { .. } => {
                ErrorKind::BadRequest
            }
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Internal { .. } => ErrorKind::Internal,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Returns the caller-safe message without the kind prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::Internal { context, .. } => context.clone(),
            other => other.to_string(),
        }
    }
}

/// Maps an I/O error from `operation` on `path` into the failure taxonomy.
///
/// Only errors with no better classification become [`Error::Internal`].
///
/// # Examples
///
/// ```
/// use fsgate::error::from_io;
/// use fsgate::ErrorKind;
/// use std::io;
/// use std::path::Path;
///
/// let err = from_io(io::Error::from(io::ErrorKind::AlreadyExists), "mkdir", Path::new("a"));
/// assert_eq!(err.kind(), ErrorKind::Conflict);
/// ```
pub fn from_io(err: io::Error, operation: &str, path: &Path) -> Error {
    let shown = path.display();
    match err.kind() {
        io::ErrorKind::NotFound => Error::not_found(format!("{operation}: {shown} does not exist")),
        io::ErrorKind::PermissionDenied => {
            Error::forbidden(format!("{operation}: permission denied for {shown}"))
        }
        io::ErrorKind::AlreadyExists => {
            Error::conflict(format!("{operation}: {shown} already exists"))
        }
        io::ErrorKind::DirectoryNotEmpty => {
            Error::conflict(format!("{operation}: directory {shown} is not empty"))
        }
        io::ErrorKind::NotADirectory => {
            Error::bad_request(format!("{operation}: a component of {shown} is not a directory"))
        }
        _ => Error::internal(format!("{operation} failed for {shown}"), err),
    }
}
