//! Rename and move operation planning.
//!
//! Both are a single atomic `rename(2)`; rename keeps the parent directory
//! and takes a bare new name, move takes a full destination path.

use crate::error::Result;
use crate::path::{PathResolver, ResolvedPath, Roots};

use super::plan::{OperationPlan, PlanAction};

fn rename_plan(description: String, from: ResolvedPath, to: ResolvedPath) -> OperationPlan {
    let from_vpath = from.virtual_path().clone();
    let to_vpath = to.virtual_path().clone();
    OperationPlan::new(description)
        .add_action(PlanAction::Rename { from, to })
        .add_path(from_vpath)
        .add_path(to_vpath)
}

/// Plans renaming an entry within its directory.
///
/// # Examples
///
/// ```no_run
/// use fsgate::operations::{PlanExecutor, RenamePlan};
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files")).unwrap();
/// let plan = RenamePlan::new("docs/a.txt", "b.txt").build_plan(&roots).unwrap();
/// let result = PlanExecutor::new().execute(&plan).unwrap();
/// assert_eq!(result.paths, vec!["docs/a.txt", "docs/b.txt"]);
/// ```
#[derive(Debug, Clone)]
pub struct RenamePlan {
    path: String,
    new_name: String,
}

impl RenamePlan {
    /// Creates a rename planner.
    #[must_use]
    pub fn new(path: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            new_name: new_name.into(),
        }
    }

    /// Builds an operation plan for this rename request.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error; see
    /// [`PathResolver::resolve_for_rename`].
    pub fn build_plan(&self, roots: &Roots) -> Result<OperationPlan> {
        let (from, to) = PathResolver::new(roots).resolve_for_rename(&self.path, &self.new_name)?;
        let description = format!("Rename {} to {}", from.virtual_path(), self.new_name);
        Ok(rename_plan(description, from, to))
    }
}

/// Plans moving an entry, possibly into another directory.
#[derive(Debug, Clone)]
pub struct MovePlan {
    source: String,
    destination: String,
}

impl MovePlan {
    /// Creates a move planner.
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Builds an operation plan for this move request.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error; see [`PathResolver::resolve_for_move`].
    pub fn build_plan(&self, roots: &Roots) -> Result<OperationPlan> {
        let (from, to) = PathResolver::new(roots).resolve_for_move(&self.source, &self.destination)?;
        let description = format!("Move {} to {}", from.virtual_path(), to.virtual_path());
        Ok(rename_plan(description, from, to))
    }
}
