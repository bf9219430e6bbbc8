#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fsgate
//!
//! A library for filesystem mutations confined to a single root directory.
//!
//! Client-supplied paths are untrusted. Every operation validates them
//! lexically, probes the filesystem without following symlinks, and
//! re-checks canonical ancestors before touching anything, so nothing
//! outside the configured root can be written, moved or deleted. Files can
//! additionally be shared as symlinks under a separate public root.
//!
//! ## Core Types
//!
//! - [`FileService`]: one method per operation, the boundary transports use
//! - [`Roots`] and [`PathResolver`]: confinement of virtual paths
//! - [`operations`]: planners, the [`PlanExecutor`](operations::PlanExecutor)
//!   and the upload primitive
//! - [`Error`], [`ErrorKind`] and [`Result`]: the failure taxonomy
//! - [`Config`] and [`ConfigBuilder`]: layered configuration
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use fsgate::{ErrorKind, FileService, Roots};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let service = FileService::new(Roots::new(dir.path()).unwrap());
//!
//! service.mkdir("docs").unwrap();
//! let err = service.delete("../etc/passwd").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::BadRequest);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod operations;
pub mod path;
pub mod service;

pub use config::{Config, ConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    BatchStatus, CancelFlag, FileReport, FileStatus, UploadFile, UploadOptions, UploadReport,
};
pub use path::{EntryKind, PathResolver, ResolvedPath, Roots, VirtualPath};
pub use service::{FileService, Outcome};
