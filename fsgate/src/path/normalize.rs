//! Normalization of operator-supplied paths.
//!
//! Configured roots come from files, flags, and environment variables. They
//! may use `~` and may be relative; these helpers turn them into absolute,
//! lexically clean paths before the roots are canonicalized.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading tilde (`~` or `~/path`) to the home directory.
///
/// `~user` syntax is not supported.
///
/// # Errors
///
/// Returns a validation error if the path is not UTF-8, the home directory
/// cannot be determined, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use fsgate::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/shared")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("shared"));
///
/// assert_eq!(expand_tilde(Path::new("/srv")).unwrap(), Path::new("/srv"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let invalid = |reason: &str| Error::Validation {
        field: path.display().to_string(),
        message: reason.to_string(),
    };

    let path_str = path
        .to_str()
        .ok_or_else(|| invalid("path contains invalid UTF-8"))?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| invalid("cannot determine home directory"))?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home.join(rest))
    } else {
        Err(invalid("~user syntax is not supported; use ~ or ~/path"))
    }
}

/// Normalize a path to absolute, lexically clean form.
///
/// Expands `~`, joins relative paths onto the current directory, and resolves
/// `.` and `..` without touching the filesystem.
///
/// # Errors
///
/// Returns an error if tilde expansion fails or the current directory cannot
/// be read.
///
/// # Examples
///
/// ```
/// use fsgate::path::normalize::normalize;
/// use std::path::Path;
///
/// assert_eq!(normalize(Path::new("/srv/./a/../b")).unwrap(), Path::new("/srv/b"));
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    let mut result = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if result.parent().is_some() {
                    result.pop();
                }
            }
            Component::CurDir => {}
            other => result.push(other),
        }
    }
    Ok(result)
}
