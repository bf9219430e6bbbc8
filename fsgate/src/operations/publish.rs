//! Publish and unpublish operation planning.
//!
//! A published file is represented by a symlink under the public root whose
//! relative path mirrors the file's path under the primary root and whose
//! target is the file's absolute path. Each virtual path moves through
//! `absent -> linked -> absent`; publishing an already linked path is a
//! no-op, and a link with a different target is never overwritten.

use std::fs;

use crate::error::{from_io, Error, Result};
use crate::path::{EntryKind, PathResolver, ResolvedPath, Roots, VirtualPath};

use super::plan::{OperationPlan, PlanAction};

/// Plans publishing a regular file as a share link.
///
/// # Examples
///
/// ```no_run
/// use fsgate::operations::{PlanExecutor, PublishPlan};
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files"))
///     .unwrap()
///     .with_public_root(Path::new("/srv/public"))
///     .unwrap();
/// let plan = PublishPlan::new("docs/a.txt").build_plan(&roots).unwrap();
/// PlanExecutor::new().execute(&plan).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PublishPlan {
    path: String,
}

impl PublishPlan {
    /// Creates a publish planner for the virtual path `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Builds an operation plan for this publish request.
    ///
    /// An existing link to the same target yields a plan with no actions and
    /// a warning.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if sharing is not configured or a link ancestor escapes
    ///   the public root
    /// - the resolver's errors for the file itself
    /// - `Conflict` if anything other than the same link occupies the share
    ///   location, or a link ancestor is not a directory
    pub fn build_plan(&self, roots: &Roots) -> Result<OperationPlan> {
        let resolver = PathResolver::new(roots);
        roots.require_public_root()?;

        let target = resolver.resolve_for_publish(&self.path)?;
        let vpath = target.virtual_path().clone();
        if let Some(blocker) = resolver.share_link_blocker(&vpath)? {
            return Err(Error::conflict(format!(
                "share location for {vpath} is blocked by a non-directory at {blocker}"
            )));
        }
        let link = resolver.resolve_share_link(&vpath)?;

        let plan = OperationPlan::new(format!("Publish {vpath}")).add_path(&vpath);

        match link.kind() {
            EntryKind::Missing => {}
            EntryKind::Symlink => {
                let existing = fs::read_link(link.path())
                    .map_err(|e| from_io(e, "publish", vpath.as_path()))?;
                if existing == target.path() {
                    return Ok(plan.add_warning(format!("{vpath} is already published")));
                }
                return Err(Error::conflict(format!(
                    "{vpath} is already shared with a different target"
                )));
            }
            other => {
                return Err(Error::conflict(format!(
                    "share location for {vpath} is occupied by {}",
                    other.describe()
                )));
            }
        }

        let mut plan = plan;
        if let Some(parent) = Self::missing_link_parent(roots, &vpath)? {
            plan = plan.add_action(PlanAction::CreateDirectoryChain(parent));
        }

        Ok(plan.add_action(PlanAction::CreateLink {
            link,
            target: target.into_path_buf(),
        }))
    }

    /// The link's parent directory when it still has to be created.
    fn missing_link_parent(roots: &Roots, vpath: &VirtualPath) -> Result<Option<ResolvedPath>> {
        let parent_vpath = vpath.parent();
        if parent_vpath.is_root() {
            return Ok(None);
        }

        let public_root = roots.require_public_root()?;
        let parent = parent_vpath.under(public_root);
        match EntryKind::probe(&parent)? {
            EntryKind::Directory | EntryKind::Symlink => Ok(None),
            EntryKind::Missing => Ok(Some(ResolvedPath::new(
                parent,
                parent_vpath,
                EntryKind::Missing,
            ))),
            EntryKind::File | EntryKind::Other => Err(Error::conflict(format!(
                "share location for {vpath} is blocked by a non-directory"
            ))),
        }
    }
}

/// Plans removing a share link and pruning emptied directories.
#[derive(Debug, Clone)]
pub struct UnpublishPlan {
    path: String,
}

impl UnpublishPlan {
    /// Creates an unpublish planner for the virtual path `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Builds an operation plan for this unpublish request.
    ///
    /// The shared file itself does not need to exist any more.
    ///
    /// # Errors
    ///
    /// - `Forbidden` for the root, or if sharing is not configured
    /// - `BadRequest` for a malformed path or a non-link at the location
    /// - `NotFound` if nothing is published at the path, including when a
    ///   non-directory sits where one of its ancestors would be
    pub fn build_plan(&self, roots: &Roots) -> Result<OperationPlan> {
        let public_root = roots.require_public_root()?;
        let vpath = VirtualPath::parse_non_root(&self.path, "unpublish")?;
        let resolver = PathResolver::new(roots);
        if resolver.share_link_blocker(&vpath)?.is_some() {
            return Err(Error::not_found(format!("{vpath} is not published")));
        }
        let link = resolver.resolve_share_link(&vpath)?;

        match link.kind() {
            EntryKind::Symlink => {}
            EntryKind::Missing => {
                return Err(Error::not_found(format!("{vpath} is not published")));
            }
            other => {
                return Err(Error::bad_request(format!(
                    "{vpath} is {} in the public tree, not a share link",
                    other.describe()
                )));
            }
        }

        let start = vpath.parent().under(public_root);
        Ok(OperationPlan::new(format!("Unpublish {vpath}"))
            .add_action(PlanAction::RemoveLink(link))
            .add_action(PlanAction::PruneEmptyParents {
                start,
                stop_at: public_root.to_path_buf(),
            })
            .add_path(&vpath))
    }
}
