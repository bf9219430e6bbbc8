//! Mkdir operation planning.

use crate::error::Result;
use crate::path::{PathResolver, Roots};

use super::plan::{OperationPlan, PlanAction};

/// Plans the creation of a single directory whose parent already exists.
///
/// # Examples
///
/// ```no_run
/// use fsgate::operations::{MkdirPlan, PlanExecutor};
/// use fsgate::Roots;
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files")).unwrap();
/// let plan = MkdirPlan::new("docs/reports").build_plan(&roots).unwrap();
/// PlanExecutor::new().execute(&plan).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MkdirPlan {
    path: String,
}

impl MkdirPlan {
    /// Creates a mkdir planner for the virtual path `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Builds an operation plan for this mkdir request.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error; see
    /// [`PathResolver::resolve_for_mkdir`].
    pub fn build_plan(&self, roots: &Roots) -> Result<OperationPlan> {
        let target = PathResolver::new(roots).resolve_for_mkdir(&self.path)?;
        let vpath = target.virtual_path().clone();

        Ok(OperationPlan::new(format!("Create directory {vpath}"))
            .add_action(PlanAction::CreateDirectory(target))
            .add_path(&vpath))
    }
}
