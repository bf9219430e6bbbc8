//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans and
//! applies them to the filesystem. Every io error is mapped through
//! [`from_io`] using the virtual path, so messages never carry the absolute
//! location of the roots.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{from_io, Error, Result};
use crate::path::{EntryKind, ResolvedPath};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Virtual paths reported to the caller.
    pub paths: Vec<String>,

    /// Number of empty directories removed by pruning.
    pub pruned: usize,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool, pruned: usize) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            paths: plan.paths.clone(),
            pruned,
        }
    }
}

/// Executes operation plans against the filesystem.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting the actions without performing them).
///
/// # Examples
///
/// ```no_run
/// use fsgate::operations::{DeletePlan, PlanExecutor};
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files")).unwrap();
/// let plan = DeletePlan::new("old.txt").build_plan(&roots).unwrap();
///
/// let preview = PlanExecutor::new().dry_run().execute(&plan).unwrap();
/// assert!(preview.dry_run);
///
/// let result = PlanExecutor::new().execute(&plan).unwrap();
/// assert_eq!(result.paths, vec!["old.txt".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanExecutor {
    dry_run: bool,
}

impl PlanExecutor {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new() -> Self {
        Self { dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan, stopping at the first failing action.
    ///
    /// # Errors
    ///
    /// Returns the mapped error of the first action that fails.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::from_plan(plan, true, 0));
        }

        let mut pruned = 0;
        for action in &plan.actions {
            log::debug!("{}", action.description());
            pruned += Self::execute_action(action)?;
        }

        Ok(ExecutionResult::from_plan(plan, false, pruned))
    }

    /// Executes a single action, returning the number of pruned directories.
    fn execute_action(action: &PlanAction) -> Result<usize> {
        match action {
            PlanAction::RemoveFile(path) => {
                fs::remove_file(path.path()).map_err(|e| map_err(e, "delete", path))?;
            }
            PlanAction::RemoveEmptyDirectory(path) => {
                fs::remove_dir(path.path()).map_err(|e| map_err(e, "delete", path))?;
            }
            PlanAction::CreateDirectory(path) => {
                fs::create_dir(path.path()).map_err(|e| map_err(e, "mkdir", path))?;
            }
            PlanAction::CreateDirectoryChain(path) => {
                fs::create_dir_all(path.path()).map_err(|e| map_err(e, "mkdir", path))?;
            }
            PlanAction::Rename { from, to } => Self::rename(from, to)?,
            PlanAction::CreateLink { link, target } => Self::create_link(link, target)?,
            PlanAction::RemoveLink(link) => Self::remove_link(link)?,
            PlanAction::PruneEmptyParents { start, stop_at } => {
                return Ok(prune_empty_parents(start, stop_at));
            }
        }
        Ok(0)
    }

    fn rename(from: &ResolvedPath, to: &ResolvedPath) -> Result<()> {
        // rename(2) replaces an existing destination; narrow the window.
        if EntryKind::probe(to.path())?.exists() {
            return Err(Error::conflict(format!(
                "destination {} already exists",
                to.virtual_path()
            )));
        }
        fs::rename(from.path(), to.path()).map_err(|e| map_err(e, "rename", from))
    }

    fn create_link(link: &ResolvedPath, target: &Path) -> Result<()> {
        match symlink(target, link.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                // Lost a race with a concurrent publish.
                match fs::read_link(link.path()) {
                    Ok(existing) if existing == target => Ok(()),
                    _ => Err(Error::conflict(format!(
                        "{} is already shared with a different target",
                        link.virtual_path()
                    ))),
                }
            }
            Err(e) => Err(map_err(e, "publish", link)),
        }
    }

    fn remove_link(link: &ResolvedPath) -> Result<()> {
        if EntryKind::probe(link.path())? != EntryKind::Symlink {
            return Err(Error::bad_request(format!(
                "{} is not a share link",
                link.virtual_path()
            )));
        }
        fs::remove_file(link.path()).map_err(|e| map_err(e, "unpublish", link))
    }
}

fn map_err(err: io::Error, operation: &str, path: &ResolvedPath) -> Error {
    from_io(err, operation, path.virtual_path().as_path())
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// Removes empty directories from `start` upward, strictly below `stop_at`.
///
/// Stops at the first directory that cannot be removed (not empty,
/// inaccessible, already gone) and returns how many were removed.
pub(crate) fn prune_empty_parents(start: &Path, stop_at: &Path) -> usize {
    let mut removed = 0;
    let mut current = start;

    while current != stop_at && current.starts_with(stop_at) {
        if let Err(e) = fs::remove_dir(current) {
            log::debug!("stopped pruning at {}: {e}", current.display());
            break;
        }
        removed += 1;
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::path::VirtualPath;
    use tempfile::tempdir;

    fn resolved(base: &Path, raw: &str) -> ResolvedPath {
        let vpath = VirtualPath::parse(raw).unwrap();
        let abs = vpath.under(base);
        let kind = EntryKind::probe(&abs).unwrap();
        ResolvedPath::new(abs, vpath, kind)
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();

        let plan = OperationPlan::new("Delete a.txt")
            .add_action(PlanAction::RemoveFile(resolved(dir.path(), "a.txt")))
            .add_path("a.txt");
        let result = PlanExecutor::new().dry_run().execute(&plan).unwrap();

        assert!(result.dry_run);
        assert_eq!(result.actions_taken, vec!["Remove file a.txt".to_string()]);
        assert!(dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_remove_non_empty_directory_conflicts() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("d")).unwrap();
        fs::write(dir.path().join("d/f"), "x").unwrap();

        let plan = OperationPlan::new("Delete d")
            .add_action(PlanAction::RemoveEmptyDirectory(resolved(dir.path(), "d")));
        let err = PlanExecutor::new().execute(&plan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(!err.message().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_create_directory_race_conflicts() {
        let dir = tempdir().unwrap();
        let target = resolved(dir.path(), "new");
        fs::create_dir(dir.path().join("new")).unwrap();

        let plan = OperationPlan::new("mkdir").add_action(PlanAction::CreateDirectory(target));
        let err = PlanExecutor::new().execute(&plan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_rename_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a"), "a").unwrap();
        let from = resolved(dir.path(), "a");
        let to = resolved(dir.path(), "b");
        fs::write(dir.path().join("b"), "b").unwrap();

        let plan = OperationPlan::new("rename").add_action(PlanAction::Rename { from, to });
        let err = PlanExecutor::new().execute(&plan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(fs::read_to_string(dir.path().join("b")).unwrap(), "b");
    }

    #[test]
    fn test_rename_vanished_source_not_found() {
        let dir = tempdir().unwrap();
        let from = resolved(dir.path(), "gone");
        let to = resolved(dir.path(), "b");

        let plan = OperationPlan::new("rename").add_action(PlanAction::Rename { from, to });
        let err = PlanExecutor::new().execute(&plan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_prune_stops_at_non_empty_and_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("a/keep.txt"), "x").unwrap();

        assert_eq!(prune_empty_parents(&root.join("a/b/c"), root), 2);
        assert!(root.join("a").exists());
        assert!(!root.join("a/b").exists());

        fs::remove_file(root.join("a/keep.txt")).unwrap();
        assert_eq!(prune_empty_parents(&root.join("a"), root), 1);
        assert!(root.exists());
    }

    #[test]
    fn test_prune_outside_stop_does_nothing() {
        let dir = tempdir().unwrap();
        let other = tempdir().unwrap();
        assert_eq!(prune_empty_parents(other.path(), dir.path()), 0);
        assert!(other.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_create_link_existing_same_target_is_ok() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("t.txt");
        fs::write(&target, "x").unwrap();
        let link = resolved(dir.path(), "l.txt");
        std::os::unix::fs::symlink(&target, dir.path().join("l.txt")).unwrap();

        let plan = OperationPlan::new("publish").add_action(PlanAction::CreateLink {
            link: link.clone(),
            target: target.clone(),
        });
        PlanExecutor::new().execute(&plan).unwrap();

        let other = OperationPlan::new("publish").add_action(PlanAction::CreateLink {
            link,
            target: dir.path().join("other.txt"),
        });
        let err = PlanExecutor::new().execute(&other).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_remove_link_refuses_regular_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("f"), "x").unwrap();
        let plan =
            OperationPlan::new("unpublish").add_action(PlanAction::RemoveLink(resolved(dir.path(), "f")));
        let err = PlanExecutor::new().execute(&plan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(dir.path().join("f").exists());
    }
}
