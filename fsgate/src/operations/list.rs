//! Listing of the public share tree.

use std::fs;

use walkdir::WalkDir;

use crate::error::Result;
use crate::path::validate::{contained_relative, to_slash};
use crate::path::Roots;

/// Lists the files currently reachable through the public root.
///
/// A leaf is included if it is a regular file, or a symlink whose target is
/// a regular file. Directories, broken symlinks, symlinks to directories and
/// special files are left out. Symlinked directories are not descended into.
/// Entries that cannot be read are skipped. Paths are forward-slash relative
/// paths, sorted.
///
/// # Errors
///
/// Returns `Forbidden` if sharing is not configured.
///
/// # Examples
///
/// ```no_run
/// use fsgate::operations::list_public;
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files"))
///     .unwrap()
///     .with_public_root(Path::new("/srv/public"))
///     .unwrap();
/// for path in list_public(&roots).unwrap() {
///     println!("{path}");
/// }
/// ```
pub fn list_public(roots: &Roots) -> Result<Vec<String>> {
    let public_root = roots.require_public_root()?;

    let mut paths = Vec::new();
    for entry in WalkDir::new(public_root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("skipping unreadable public entry: {e}");
                continue;
            }
        };

        let file_type = entry.file_type();
        let listed = if file_type.is_file() {
            true
        } else if file_type.is_symlink() {
            fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file())
        } else {
            false
        };
        if !listed {
            continue;
        }

        if let Some(rel) = contained_relative(public_root, entry.path()) {
            paths.push(to_slash(&rel));
        }
    }

    paths.sort();
    Ok(paths)
}
