//! Streaming uploads.
//!
//! Uploads do not go through the plan/execute split: their content is a
//! stream that can only be consumed once. The write primitive creates the
//! destination exclusively and removes the partial file on any failure.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::error::{from_io, Error, ErrorKind, Result};
use crate::path::canonicalize::canonicalize;
use crate::path::validate::{contained_relative, validate_filename};
use crate::path::{EntryKind, PathResolver, ResolvedPath, Roots, VirtualPath};

/// A shared flag a transport sets when the client goes away.
///
/// Checked before a batch begins and before each file starts; a write that
/// has started runs to completion or cleanup.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the request as cancelled.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the request has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for an upload batch.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Largest accepted file, in bytes.
    pub max_bytes: u64,

    /// Accept file names starting with a dot.
    pub allow_hidden: bool,

    /// Cancellation signal from the transport.
    pub cancel: Option<CancelFlag>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_bytes: crate::config::DEFAULT_MAX_UPLOAD_BYTES,
            allow_hidden: false,
            cancel: None,
        }
    }
}

impl UploadOptions {
    /// Creates options with the default limit and hidden names refused.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsgate::operations::{CancelFlag, UploadOptions};
    ///
    /// let flag = CancelFlag::new();
    /// let options = UploadOptions::new()
    ///     .with_max_bytes(1024)
    ///     .with_cancel_flag(flag.clone());
    /// assert_eq!(options.max_bytes, 1024);
    /// assert!(!options.is_cancelled());
    /// flag.cancel();
    /// assert!(options.is_cancelled());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the limit and hidden-name policy from a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_max_bytes(config.upload_limit())
            .with_allow_hidden(config.hidden_uploads_allowed())
    }

    /// Sets the per-file size ceiling.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Sets whether hidden names are accepted.
    #[must_use]
    pub const fn with_allow_hidden(mut self, allow: bool) -> Self {
        self.allow_hidden = allow;
        self
    }

    /// Attaches a cancellation flag.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Whether the attached flag (if any) is set.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// One file of an upload batch: the client-supplied name and its content.
#[derive(Debug)]
pub struct UploadFile<R> {
    /// Base name to create inside the target directory.
    pub name: String,
    /// The content stream.
    pub reader: R,
}

impl<R: Read> UploadFile<R> {
    /// Pairs a name with its content.
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

/// What happened to one file of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Written in full.
    Uploaded,
    /// A file of that name already existed; nothing was written.
    Skipped,
    /// The name or size was not acceptable.
    Invalid,
    /// The write failed unexpectedly.
    Failed,
}

/// Per-file outcome of an upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The name as supplied by the client.
    pub name: String,
    /// The outcome.
    pub status: FileStatus,
    /// Virtual path of the written file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Why the file was not uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileReport {
    fn uploaded(name: &str, vpath: &VirtualPath) -> Self {
        Self {
            name: name.to_string(),
            status: FileStatus::Uploaded,
            path: Some(vpath.to_string()),
            message: None,
        }
    }

    fn rejected(name: &str, status: FileStatus, message: String) -> Self {
        Self {
            name: name.to_string(),
            status,
            path: None,
            message: Some(message),
        }
    }
}

/// Summary status of a batch, for transports that answer with one code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// At least one file was uploaded.
    Created,
    /// Nothing uploaded; at least one name already existed.
    Conflict,
    /// Nothing uploaded or skipped; names invalid or the batch was empty.
    BadRequest,
    /// Every file failed unexpectedly.
    Failed,
}

impl BatchStatus {
    /// Summarises per-file reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsgate::operations::BatchStatus;
    ///
    /// assert_eq!(BatchStatus::from_reports(&[]), BatchStatus::BadRequest);
    /// ```
    #[must_use]
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let any = |status| reports.iter().any(|r| r.status == status);
        if any(FileStatus::Uploaded) {
            Self::Created
        } else if any(FileStatus::Skipped) {
            Self::Conflict
        } else if reports.is_empty() || any(FileStatus::Invalid) {
            Self::BadRequest
        } else {
            Self::Failed
        }
    }

    /// The failure kind this status corresponds to, `None` for success.
    #[must_use]
    pub const fn error_kind(self) -> Option<ErrorKind> {
        match self {
            Self::Created => None,
            Self::Conflict => Some(ErrorKind::Conflict),
            Self::BadRequest => Some(ErrorKind::BadRequest),
            Self::Failed => Some(ErrorKind::Internal),
        }
    }
}

/// Outcome of an upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    /// Virtual path of the target directory.
    pub target: String,
    /// One report per file, in request order.
    pub files: Vec<FileReport>,
    /// Summary for the whole batch.
    pub status: BatchStatus,
}

/// Removes a partially written file unless disarmed.
struct PartialFile<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> PartialFile<'a> {
    const fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn keep(mut self) {
        self.armed = false;
    }
}

impl Drop for PartialFile<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = fs::remove_file(self.path) {
                log::warn!("failed to remove partial upload {}: {e}", self.path.display());
            }
        }
    }
}

/// Streams `reader` into a new file at `dest`, never overwriting.
///
/// The file is opened with exclusive create, filled, and synced before
/// close. On any failure, including exceeding `limit` bytes, the partial file
/// is removed. Returns the number of bytes written.
///
/// # Errors
///
/// - `Conflict` if `dest` already exists
/// - `BadRequest` if the content exceeds `limit`
/// - a mapped error for any other I/O failure
pub fn write_exclusive<R: Read + ?Sized>(
    dest: &ResolvedPath,
    reader: &mut R,
    limit: u64,
) -> Result<u64> {
    let vpath = dest.virtual_path();
    let map = |e: io::Error| from_io(e, "upload", vpath.as_path());

    let mut file: File = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest.path())
        .map_err(map)?;
    let guard = PartialFile::new(dest.path());

    let mut limited = (&mut *reader).take(limit.saturating_add(1));
    let written = io::copy(&mut limited, &mut file).map_err(map)?;
    if written > limit {
        return Err(Error::bad_request(format!(
            "{vpath} exceeds the upload limit of {limit} bytes"
        )));
    }

    file.flush().map_err(map)?;
    file.sync_all().map_err(map)?;
    drop(file);

    guard.keep();
    Ok(written)
}

/// Uploads a batch of files into `target_dir`.
///
/// The target directory is resolved once and created (with missing parents)
/// if needed; a failure there fails the whole request. Each file is then
/// handled independently and reported in the returned [`UploadReport`].
///
/// # Errors
///
/// - `Cancelled` if the flag in `options` is set before the batch or before
///   any file starts
/// - the resolver's errors for `target_dir`, or a mapped error if it cannot
///   be created
///
/// # Examples
///
/// ```no_run
/// use fsgate::operations::{upload_batch, BatchStatus, UploadFile, UploadOptions};
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files")).unwrap();
/// let files = vec![UploadFile::new("hello.txt", &b"hello"[..])];
/// let report = upload_batch(&roots, "inbox", files, &UploadOptions::new()).unwrap();
/// assert_eq!(report.status, BatchStatus::Created);
/// ```
pub fn upload_batch<R: Read>(
    roots: &Roots,
    target_dir: &str,
    files: Vec<UploadFile<R>>,
    options: &UploadOptions,
) -> Result<UploadReport> {
    if options.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let target = PathResolver::new(roots).resolve_for_write(target_dir)?;
    if target.kind() == EntryKind::Missing {
        create_target_dir(roots, &target)?;
    }

    let mut reports = Vec::with_capacity(files.len());
    for mut file in files {
        if options.is_cancelled() {
            log::debug!(
                "upload to {} cancelled after {} file(s)",
                target.virtual_path(),
                reports.len()
            );
            return Err(Error::Cancelled);
        }
        reports.push(upload_one(&target, &mut file, options));
    }

    let status = BatchStatus::from_reports(&reports);
    Ok(UploadReport {
        target: target.virtual_path().to_string(),
        files: reports,
        status,
    })
}

fn create_target_dir(roots: &Roots, target: &ResolvedPath) -> Result<()> {
    let vpath = target.virtual_path();
    fs::create_dir_all(target.path()).map_err(|e| from_io(e, "upload", vpath.as_path()))?;

    // An ancestor swapped for a symlink mid-creation must not win.
    let canonical = canonicalize(target.path())?;
    if contained_relative(roots.root(), &canonical).is_none() {
        return Err(Error::forbidden(format!(
            "{vpath} resolves outside the allowed directory"
        )));
    }
    log::debug!("created upload directory {vpath}");
    Ok(())
}

fn upload_one<R: Read>(
    target: &ResolvedPath,
    file: &mut UploadFile<R>,
    options: &UploadOptions,
) -> FileReport {
    let name = file.name.as_str();
    if let Err(e) = validate_filename(name, options.allow_hidden) {
        return FileReport::rejected(name, FileStatus::Invalid, e.message());
    }

    let vpath = target.virtual_path().join(name);
    let abs = target.path().join(name);
    let kind = match EntryKind::probe(&abs) {
        Ok(kind) => kind,
        Err(e) => return failure_report(name, &e),
    };
    if kind.exists() {
        return FileReport::rejected(
            name,
            FileStatus::Skipped,
            format!("{vpath} already exists"),
        );
    }

    let dest = ResolvedPath::new(abs, vpath, kind);
    match write_exclusive(&dest, &mut file.reader, options.max_bytes) {
        Ok(bytes) => {
            log::debug!("uploaded {} ({bytes} bytes)", dest.virtual_path());
            FileReport::uploaded(name, dest.virtual_path())
        }
        Err(e) => failure_report(name, &e),
    }
}

fn failure_report(name: &str, err: &Error) -> FileReport {
    let status = match err.kind() {
        ErrorKind::Conflict => FileStatus::Skipped,
        ErrorKind::BadRequest => FileStatus::Invalid,
        _ => FileStatus::Failed,
    };
    if err.kind() == ErrorKind::Internal {
        match std::error::Error::source(err) {
            Some(source) => log::error!("{err}: {source}"),
            None => log::error!("{err}"),
        }
    }
    FileReport::rejected(name, status, err.message())
}
