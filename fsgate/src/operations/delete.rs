//! Delete operation planning.
//!
//! Deletes a single file or an empty directory. Recursive deletion is not
//! offered; a non-empty directory is a conflict.

use std::fs;

use crate::error::{from_io, Error, Result};
use crate::path::{EntryKind, PathResolver, Roots};

use super::plan::{OperationPlan, PlanAction};

/// A delete plan generator.
///
/// # Examples
///
/// ```no_run
/// use fsgate::operations::{DeletePlan, PlanExecutor};
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files")).unwrap();
/// let plan = DeletePlan::new("docs/old.txt").build_plan(&roots).unwrap();
/// PlanExecutor::new().execute(&plan).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DeletePlan {
    path: String,
}

impl DeletePlan {
    /// Creates a delete planner for the virtual path `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Builds an operation plan for this delete request.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error, or `Conflict` if the target is a
    /// directory that is not empty.
    pub fn build_plan(&self, roots: &Roots) -> Result<OperationPlan> {
        let target = PathResolver::new(roots).resolve_for_delete(&self.path)?;
        let vpath = target.virtual_path().clone();

        let action = if target.kind() == EntryKind::Directory {
            let mut entries = fs::read_dir(target.path())
                .map_err(|e| from_io(e, "delete", vpath.as_path()))?;
            if entries.next().is_some() {
                return Err(Error::conflict(format!("directory {vpath} is not empty")));
            }
            PlanAction::RemoveEmptyDirectory(target)
        } else {
            PlanAction::RemoveFile(target)
        };

        Ok(OperationPlan::new(format!("Delete {vpath}"))
            .add_action(action)
            .add_path(&vpath))
    }
}
