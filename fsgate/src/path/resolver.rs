//! Operation-specific resolution of virtual paths.
//!
//! The [`PathResolver`] combines lexical validation with filesystem probes.
//! Targets are always probed without following symlinks; only directories
//! (parents and ancestors) are canonicalized, to re-check that a symlinked
//! ancestor does not lead out of the root.
//!
//! Every check happens at request time. An ancestor swapped for a symlink
//! after resolution and before the mutation is not detected here.

use std::path::Path;

use crate::error::{Error, Result};
use crate::path::canonicalize::{canonicalize, canonicalize_existing};
use crate::path::types::{EntryKind, ResolvedPath, Roots, VirtualPath};
use crate::path::validate::{contained_relative, validate_name};

/// Resolves client paths against a set of [`Roots`].
///
/// # Examples
///
/// ```no_run
/// use fsgate::{PathResolver, Roots};
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files")).unwrap();
/// let resolver = PathResolver::new(&roots);
/// let target = resolver.resolve_for_delete("docs/old.txt").unwrap();
/// assert!(target.path().starts_with(roots.root()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    roots: &'a Roots,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver bounded by `roots`.
    #[must_use]
    pub const fn new(roots: &'a Roots) -> Self {
        Self { roots }
    }

    /// The roots this resolver is bounded by.
    #[must_use]
    pub const fn roots(&self) -> &'a Roots {
        self.roots
    }

    /// Resolve an upload target directory.
    ///
    /// The root itself is a valid target. A missing directory is accepted
    /// when its deepest existing ancestor is contained in the root; an
    /// existing one must be a real directory whose canonical form is
    /// contained.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for a malformed path
    /// - `Forbidden` if the target is a symlink or escapes through one
    /// - `Conflict` if the target exists and is not a directory
    pub fn resolve_for_write(&self, raw: &str) -> Result<ResolvedPath> {
        let vpath = VirtualPath::parse(raw)?;
        let root = self.roots.root();
        let abs = vpath.under(root);

        let kind = EntryKind::probe(&abs)?;
        match kind {
            EntryKind::Missing => {
                let (canonical, _) = canonicalize_existing(&abs)?;
                ensure_contained(root, &canonical, &vpath)?;
            }
            EntryKind::Directory => {
                ensure_contained(root, &canonicalize(&abs)?, &vpath)?;
            }
            EntryKind::Symlink => {
                return Err(Error::forbidden(format!(
                    "upload target {vpath} is a symlink"
                )));
            }
            EntryKind::File | EntryKind::Other => {
                return Err(Error::conflict(format!(
                    "upload target {vpath} exists and is not a directory"
                )));
            }
        }

        Ok(ResolvedPath::new(abs, vpath, kind))
    }

    /// Resolve an existing, non-symlink entry for deletion.
    ///
    /// Emptiness of directories is left to the delete primitive.
    ///
    /// # Errors
    ///
    /// - `Forbidden` for the root or a symlinked ancestor
    /// - `BadRequest` for a malformed path or a symlink target
    /// - `NotFound` if nothing exists at the path
    pub fn resolve_for_delete(&self, raw: &str) -> Result<ResolvedPath> {
        let vpath = VirtualPath::parse_non_root(raw, "delete")?;
        self.resolve_existing_source(vpath, "delete")
    }

    /// Resolve the location of a new directory.
    ///
    /// The parent is checked before the target so that nothing is probed
    /// through a parent that leads outside the root.
    ///
    /// # Errors
    ///
    /// - `Forbidden` for the root, a symlinked parent, or an escaping ancestor
    /// - `BadRequest` for a malformed path or a parent that is not a directory
    /// - `NotFound` if the parent does not exist
    /// - `Conflict` if anything already exists at the target
    pub fn resolve_for_mkdir(&self, raw: &str) -> Result<ResolvedPath> {
        let vpath = VirtualPath::parse_non_root(raw, "mkdir")?;
        validate_name(vpath.file_name().unwrap_or_default())?;

        let root = self.roots.root();
        self.check_parent_directory(root, &vpath)?;

        let abs = vpath.under(root);
        let kind = EntryKind::probe(&abs)?;
        let message = match kind {
            EntryKind::Missing => return Ok(ResolvedPath::new(abs, vpath, kind)),
            EntryKind::Directory => format!("directory {vpath} already exists"),
            EntryKind::Symlink => format!("a symlink already exists at {vpath}"),
            EntryKind::File | EntryKind::Other => format!("a file already exists at {vpath}"),
        };
        Err(Error::conflict(message))
    }

    /// Resolve a rename of `raw` to `new_name` within the same directory.
    ///
    /// Returns the source and destination.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for a malformed path or name, or a symlink source
    /// - `Forbidden` for the root or a symlinked ancestor
    /// - `NotFound` if the source does not exist
    /// - `Conflict` if the destination exists
    pub fn resolve_for_rename(
        &self,
        raw: &str,
        new_name: &str,
    ) -> Result<(ResolvedPath, ResolvedPath)> {
        let source_vpath = VirtualPath::parse_non_root(raw, "rename")?;
        validate_name(new_name)?;

        let source = self.resolve_existing_source(source_vpath, "rename")?;
        let dest_vpath = source.virtual_path().with_name(new_name);
        let dest = self.resolve_free_destination(dest_vpath)?;

        Ok((source, dest))
    }

    /// Resolve a move of `source_raw` to `dest_raw`, possibly across
    /// directories.
    ///
    /// Returns the source and destination.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for malformed paths, a symlink source, a destination
    ///   parent that is not a directory, or a directory moved into itself
    /// - `Forbidden` for the root, a symlinked parent, or an escaping ancestor
    /// - `NotFound` if the source or the destination parent does not exist
    /// - `Conflict` if the destination exists
    pub fn resolve_for_move(
        &self,
        source_raw: &str,
        dest_raw: &str,
    ) -> Result<(ResolvedPath, ResolvedPath)> {
        let source_vpath = VirtualPath::parse_non_root(source_raw, "move")?;
        let dest_vpath = VirtualPath::parse_non_root(dest_raw, "move")?;

        let source = self.resolve_existing_source(source_vpath, "move")?;

        if source.kind() == EntryKind::Directory
            && dest_vpath.as_path().starts_with(source.virtual_path().as_path())
            && dest_vpath != *source.virtual_path()
        {
            return Err(Error::bad_request(format!(
                "cannot move directory {} into itself",
                source.virtual_path()
            )));
        }

        self.check_parent_directory(self.roots.root(), &dest_vpath)?;
        let dest = self.resolve_free_destination(dest_vpath)?;

        Ok((source, dest))
    }

    /// Resolve a regular file to be published.
    ///
    /// # Errors
    ///
    /// - `Forbidden` for the root or a symlinked ancestor
    /// - `BadRequest` for a malformed path, a symlink, or anything that is
    ///   not a regular file
    /// - `NotFound` if nothing exists at the path
    pub fn resolve_for_publish(&self, raw: &str) -> Result<ResolvedPath> {
        let vpath = VirtualPath::parse_non_root(raw, "publish")?;
        let target = self.resolve_existing_source(vpath, "publish")?;
        if target.kind() != EntryKind::File {
            return Err(Error::bad_request(format!(
                "only regular files can be published; {} is {}",
                target.virtual_path(),
                target.kind().describe()
            )));
        }
        Ok(target)
    }

    /// Resolve the share link location mirroring `vpath` under the public
    /// root.
    ///
    /// The link itself may or may not exist; its kind is reported. The
    /// deepest existing ancestor of the link's parent must canonicalize into
    /// the public root.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if sharing is not configured or an ancestor escapes
    pub fn resolve_share_link(&self, vpath: &VirtualPath) -> Result<ResolvedPath> {
        let public_root = self.roots.require_public_root()?;
        if vpath.is_root() {
            return Err(Error::forbidden("the public root cannot be targeted"));
        }

        let abs = vpath.under(public_root);
        let parent = vpath.parent().under(public_root);
        let (canonical, _) = canonicalize_existing(&parent)?;
        ensure_contained(public_root, &canonical, vpath)?;

        let kind = EntryKind::probe(&abs)?;
        Ok(ResolvedPath::new(abs, vpath.clone(), kind))
    }

    /// The first mirrored ancestor of `vpath` under the public root that is
    /// neither a directory nor a symlink, if any.
    ///
    /// Walks top-down and stops at the first missing or symlinked ancestor;
    /// symlinked ancestors are left to the containment check.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if sharing is not configured
    pub fn share_link_blocker(&self, vpath: &VirtualPath) -> Result<Option<VirtualPath>> {
        let public_root = self.roots.require_public_root()?;
        let mut chain = Vec::new();
        let mut current = vpath.parent();
        while !current.is_root() {
            let next = current.parent();
            chain.push(current);
            current = next;
        }

        for ancestor in chain.into_iter().rev() {
            match EntryKind::probe(&ancestor.under(public_root))? {
                EntryKind::Directory => {}
                EntryKind::Missing | EntryKind::Symlink => return Ok(None),
                EntryKind::File | EntryKind::Other => return Ok(Some(ancestor)),
            }
        }
        Ok(None)
    }

    /// Shared source checks for delete, rename, move, and publish.
    fn resolve_existing_source(&self, vpath: VirtualPath, operation: &str) -> Result<ResolvedPath> {
        let root = self.roots.root();
        let abs = vpath.under(root);

        let parent = vpath.parent().under(root);
        let (canonical_parent, _) = canonicalize_existing(&parent)?;
        ensure_contained(root, &canonical_parent, &vpath)?;

        let kind = EntryKind::probe(&abs)?;
        match kind {
            EntryKind::Missing => Err(Error::not_found(format!("{vpath} does not exist"))),
            EntryKind::Symlink => Err(Error::bad_request(format!(
                "cannot {operation} symlinks: {vpath}"
            ))),
            _ => Ok(ResolvedPath::new(abs, vpath, kind)),
        }
    }

    /// A destination must be free; anything at it, including a dangling
    /// symlink, is a conflict.
    fn resolve_free_destination(&self, vpath: VirtualPath) -> Result<ResolvedPath> {
        let root = self.roots.root();
        let abs = vpath.under(root);
        if contained_relative(root, &abs).is_none() {
            return Err(Error::bad_request(format!("{vpath} escapes the root")));
        }

        let kind = EntryKind::probe(&abs)?;
        if kind.exists() {
            return Err(Error::conflict(format!(
                "destination {vpath} already exists as {}",
                kind.describe()
            )));
        }
        Ok(ResolvedPath::new(abs, vpath, kind))
    }

    /// The immediate parent of `vpath` must be a real directory inside `base`.
    fn check_parent_directory(&self, base: &Path, vpath: &VirtualPath) -> Result<()> {
        let parent_vpath = vpath.parent();
        let parent = parent_vpath.under(base);

        match EntryKind::probe(&parent)? {
            EntryKind::Directory => {}
            EntryKind::Missing => {
                return Err(Error::not_found(format!(
                    "parent directory of {vpath} does not exist"
                )));
            }
            EntryKind::Symlink => {
                return Err(Error::forbidden(format!(
                    "parent directory of {vpath} is a symlink"
                )));
            }
            EntryKind::File | EntryKind::Other => {
                return Err(Error::bad_request(format!(
                    "parent of {vpath} is not a directory"
                )));
            }
        }

        ensure_contained(base, &canonicalize(&parent)?, vpath)
    }
}

/// `canonical` must lie within the (already canonical) `base`.
fn ensure_contained(base: &Path, canonical: &Path, vpath: &VirtualPath) -> Result<()> {
    if contained_relative(base, canonical).is_some() {
        Ok(())
    } else {
        log::warn!(
            "rejected {vpath}: resolves to {} outside {}",
            canonical.display(),
            base.display()
        );
        Err(Error::forbidden(format!(
            "{vpath} resolves outside the allowed directory"
        )))
    }
}
