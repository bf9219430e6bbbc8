//! Core types for path handling.
//!
//! This module defines the bounding [`Roots`], the cleaned [`VirtualPath`]
//! clients address files with, the [`ResolvedPath`] produced by the resolver,
//! and the non-following [`EntryKind`] probe.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{from_io, Error, Result};
use crate::path::canonicalize::canonicalize;
use crate::path::normalize::expand_tilde;
use crate::path::validate::{clean, contained_relative, to_slash};

/// The canonical directories every operation is bounded by.
///
/// Both paths are canonicalized at construction and never change afterwards.
///
/// # Examples
///
/// ```no_run
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files"))
///     .unwrap()
///     .with_public_root(Path::new("/srv/public"))
///     .unwrap();
/// assert!(roots.public_root().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    root: PathBuf,
    public_root: Option<PathBuf>,
}

impl Roots {
    /// Creates roots bounded by `root`, with sharing disabled.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `root` cannot be canonicalized or is not
    /// a directory.
    pub fn new(root: &Path) -> Result<Self> {
        Ok(Self {
            root: canonical_dir("root", root)?,
            public_root: None,
        })
    }

    /// Enables sharing under `public_root`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `public_root` is not a directory, or if
    /// it equals, contains, or lies inside the primary root.
    pub fn with_public_root(mut self, public_root: &Path) -> Result<Self> {
        let public = canonical_dir("public_root", public_root)?;
        if contained_relative(&self.root, &public).is_some()
            || contained_relative(&public, &self.root).is_some()
        {
            return Err(Error::Validation {
                field: "public_root".into(),
                message: "must not overlap with root".into(),
            });
        }
        self.public_root = Some(public);
        Ok(self)
    }

    /// Builds roots from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing or either directory is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let root = config.root.as_deref().ok_or_else(|| Error::Validation {
            field: "root".into(),
            message: "a root directory is required".into(),
        })?;
        let roots = Self::new(&expand_tilde(root)?)?;
        match config.public_root.as_deref() {
            Some(public) => roots.with_public_root(&expand_tilde(public)?),
            None => Ok(roots),
        }
    }

    /// The canonical primary root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The canonical public root, if sharing is enabled.
    #[must_use]
    pub fn public_root(&self) -> Option<&Path> {
        self.public_root.as_deref()
    }

    /// The public root, or `Forbidden` when sharing is not configured.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if no public root is configured.
    pub fn require_public_root(&self) -> Result<&Path> {
        self.public_root()
            .ok_or_else(|| Error::forbidden("public sharing is not configured"))
    }
}

fn canonical_dir(field: &str, path: &Path) -> Result<PathBuf> {
    let canonical = canonicalize(path).map_err(|e| Error::Validation {
        field: field.into(),
        message: format!("cannot resolve {}: {}", path.display(), e.message()),
    })?;
    if !canonical.is_dir() {
        return Err(Error::Validation {
            field: field.into(),
            message: format!("{} is not a directory", path.display()),
        });
    }
    Ok(canonical)
}

/// A cleaned, relative, client-supplied path.
///
/// The empty virtual path denotes the root itself.
///
/// # Examples
///
/// ```
/// use fsgate::VirtualPath;
///
/// let vpath = VirtualPath::parse("docs//./a.txt").unwrap();
/// assert_eq!(vpath.to_string(), "docs/a.txt");
/// assert_eq!(vpath.file_name(), Some("a.txt"));
/// assert!(VirtualPath::parse("").unwrap().is_root());
/// assert!(VirtualPath::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualPath {
    rel: PathBuf,
}

impl VirtualPath {
    /// Validates and cleans a raw client path.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for traversal, absolute, or null-byte input.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self { rel: clean(raw)? })
    }

    /// Validates a raw path that must not denote the root.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for the root (empty or `.`), otherwise as
    /// [`VirtualPath::parse`].
    pub fn parse_non_root(raw: &str, operation: &str) -> Result<Self> {
        let vpath = Self::parse(raw)?;
        if vpath.is_root() {
            return Err(Error::forbidden(format!(
                "{operation}: the root directory cannot be targeted"
            )));
        }
        Ok(vpath)
    }

    /// Whether this path denotes the root itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.rel.as_os_str().is_empty()
    }

    /// The relative path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.rel
    }

    /// The final component, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.rel.file_name().and_then(|name| name.to_str())
    }

    /// The parent path; the parent of a top-level entry is the root.
    #[must_use]
    pub fn parent(&self) -> Self {
        Self {
            rel: self.rel.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }

    /// A sibling of this path with a different final component.
    #[must_use]
    pub fn with_name(&self, name: &str) -> Self {
        Self {
            rel: self.parent().rel.join(name),
        }
    }

    /// A child of this path.
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        Self {
            rel: self.rel.join(name),
        }
    }

    /// The absolute location of this path under `base`.
    #[must_use]
    pub fn under(&self, base: &Path) -> PathBuf {
        base.join(&self.rel)
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_slash(&self.rel))
    }
}

/// An absolute path proven, at check time, to lie within a root.
///
/// Carries what the resolver found at the path when it checked; the entry may
/// have changed by the time it is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    virtual_path: VirtualPath,
    kind: EntryKind,
}

impl ResolvedPath {
    pub(crate) fn new(path: PathBuf, virtual_path: VirtualPath, kind: EntryKind) -> Self {
        Self {
            path,
            virtual_path,
            kind,
        }
    }

    /// The absolute filesystem path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The virtual path this was resolved from.
    #[must_use]
    pub fn virtual_path(&self) -> &VirtualPath {
        &self.virtual_path
    }

    /// What was found at the path during resolution.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Consume this resolved path and return the absolute path.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

/// What currently sits at a path, probed without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing exists at the path.
    Missing,
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link (never followed).
    Symlink,
    /// A socket, fifo, device, or other special file.
    Other,
}

impl EntryKind {
    /// Probes `path` with `symlink_metadata`.
    ///
    /// # Errors
    ///
    /// Returns a mapped error for any failure other than "not found".
    pub fn probe(path: &Path) -> Result<Self> {
        match fs::symlink_metadata(path) {
            Ok(meta) => {
                let file_type = meta.file_type();
                Ok(if file_type.is_symlink() {
                    Self::Symlink
                } else if file_type.is_dir() {
                    Self::Directory
                } else if file_type.is_file() {
                    Self::File
                } else {
                    Self::Other
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::Missing),
            // Name only the leaf; absolute paths stay out of client messages.
            Err(e) => Err(from_io(e, "stat", Path::new(path.file_name().unwrap_or_default()))),
        }
    }

    /// Whether anything exists at the path.
    #[must_use]
    pub fn exists(self) -> bool {
        self != Self::Missing
    }

    /// A short noun for messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Missing => "nothing",
            Self::File => "a file",
            Self::Directory => "a directory",
            Self::Symlink => "a symlink",
            Self::Other => "a special file",
        }
    }
}
