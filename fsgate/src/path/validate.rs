//! Lexical validation of client-supplied paths and names.
//!
//! Nothing in this module touches the filesystem. Virtual paths are cleaned
//! (empty and `.` segments collapse) and rejected outright if they carry a
//! `..` segment, a leading separator, or a null byte.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Cleans a slash-separated virtual path into a relative `PathBuf`.
///
/// The empty result stands for the root itself; callers decide whether that
/// is acceptable.
///
/// # Errors
///
/// Returns `BadRequest` if the input contains a null byte, is absolute, or has
/// a `..` segment anywhere, even one lexical cleaning would cancel.
///
/// # Examples
///
/// ```
/// use fsgate::path::validate::clean;
/// use std::path::PathBuf;
///
/// assert_eq!(clean("docs//./a.txt").unwrap(), PathBuf::from("docs/a.txt"));
/// assert_eq!(clean("").unwrap(), PathBuf::new());
/// assert!(clean("a/../b").is_err());
/// assert!(clean("/etc/passwd").is_err());
/// ```
pub fn clean(raw: &str) -> Result<PathBuf> {
    if raw.contains('\0') {
        return Err(Error::bad_request("path contains a null byte"));
    }
    if raw.starts_with('/') || Path::new(raw).is_absolute() {
        return Err(Error::bad_request(format!("absolute path not allowed: {raw}")));
    }

    let mut cleaned = PathBuf::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(Error::bad_request(format!(
                    "path traversal not allowed: {raw}"
                )));
            }
            name => cleaned.push(name),
        }
    }

    // Platform parsing must agree that only normal components remain.
    if cleaned
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(Error::bad_request(format!("invalid path: {raw}")));
    }

    Ok(cleaned)
}

/// Validates a bare name used as a rename target or new directory name.
///
/// # Errors
///
/// Returns `BadRequest` if the name is empty, `.` or `..`, or contains a
/// separator or null byte.
///
/// # Examples
///
/// ```
/// use fsgate::path::validate::validate_name;
///
/// assert!(validate_name("report.txt").is_ok());
/// assert!(validate_name("..").is_err());
/// assert!(validate_name("a/b").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::bad_request("name must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(Error::bad_request(format!("invalid name: {name}")));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(Error::bad_request(format!(
            "name must not contain a path separator: {name}"
        )));
    }
    if name.contains('\0') {
        return Err(Error::bad_request("name contains a null byte"));
    }
    Ok(())
}

/// Validates the file name of an uploaded file.
///
/// Stricter than [`validate_name`]: hidden names (leading `.`) are refused
/// unless `allow_hidden` is set.
///
/// # Errors
///
/// Returns `BadRequest` for any name that is not a plain, visible base name.
///
/// # Examples
///
/// ```
/// use fsgate::path::validate::validate_filename;
///
/// assert!(validate_filename("photo.jpg", false).is_ok());
/// assert!(validate_filename(".bashrc", false).is_err());
/// assert!(validate_filename(".bashrc", true).is_ok());
/// assert!(validate_filename("../x", true).is_err());
/// ```
pub fn validate_filename(name: &str, allow_hidden: bool) -> Result<()> {
    validate_name(name)?;
    if !allow_hidden && name.starts_with('.') {
        return Err(Error::bad_request(format!(
            "hidden files are not allowed: {name}"
        )));
    }
    Ok(())
}

/// Computes `candidate` relative to `root`, or `None` if it escapes.
///
/// Comparison is component-wise, so `/srv/data2` is not inside `/srv/data`.
/// An empty result means `candidate` is the root itself.
///
/// # Examples
///
/// ```
/// use fsgate::path::validate::contained_relative;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/srv");
/// assert_eq!(
///     contained_relative(root, Path::new("/srv/docs/a.txt")),
///     Some(PathBuf::from("docs/a.txt"))
/// );
/// assert_eq!(contained_relative(root, Path::new("/srv2/a")), None);
/// assert_eq!(contained_relative(root, Path::new("/srv/../etc")), None);
/// ```
#[must_use]
pub fn contained_relative(root: &Path, candidate: &Path) -> Option<PathBuf> {
    let rel = candidate.strip_prefix(root).ok()?;
    if rel
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        Some(rel.to_path_buf())
    } else {
        None
    }
}

/// Renders a relative path with forward-slash separators.
#[must_use]
pub fn to_slash(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
