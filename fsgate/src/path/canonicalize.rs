//! Path canonicalization functions.
//!
//! Canonicalization follows symlinks to the real path. It is used only for
//! containment re-checks of directories; targets themselves are always probed
//! without following links.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{from_io, Error, Result};

/// Canonicalize an existing path by following every symlink.
///
/// # Errors
///
/// Returns `NotFound` if the path (or a link it passes through) does not
/// exist, `Forbidden` on permission denial, `Internal` otherwise.
///
/// # Examples
///
/// ```no_run
/// use fsgate::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path)
        .map_err(|e| from_io(e, "canonicalize", Path::new(path.file_name().unwrap_or_default())))
}

/// Canonicalize the existing portion of a path.
///
/// Walks up from `path` to the deepest ancestor that exists (probed without
/// following symlinks), canonicalizes it, and returns it together with the
/// components that do not exist yet.
///
/// # Errors
///
/// Returns an error if no ancestor exists or canonicalization fails.
///
/// # Examples
///
/// ```no_run
/// use fsgate::path::canonicalize::canonicalize_existing;
/// use std::path::Path;
///
/// let (canonical, remainder) =
///     canonicalize_existing(Path::new("/tmp/nonexistent/file")).unwrap();
/// assert_eq!(remainder, Some(Path::new("nonexistent/file").to_path_buf()));
/// ```
pub fn canonicalize_existing(path: &Path) -> Result<(PathBuf, Option<PathBuf>)> {
    let mut current = path.to_path_buf();
    let mut non_existent: Vec<OsString> = Vec::new();

    loop {
        match fs::symlink_metadata(&current) {
            Ok(_) => {
                let canonical = canonicalize(&current)?;
                let remainder = if non_existent.is_empty() {
                    None
                } else {
                    non_existent.reverse();
                    Some(non_existent.into_iter().collect())
                };
                return Ok((canonical, remainder));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                let leaf = Path::new(current.file_name().unwrap_or_default());
                return Err(from_io(e, "stat", leaf));
            }
        }

        match current.file_name() {
            Some(name) => {
                non_existent.push(name.to_os_string());
                current.pop();
            }
            None => {
                let leaf = Path::new(path.file_name().unwrap_or_default());
                return Err(Error::not_found(format!(
                    "no existing ancestor of {}",
                    leaf.display()
                )));
            }
        }
    }
}
