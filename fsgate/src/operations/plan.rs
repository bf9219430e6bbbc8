//! Plan types for filesystem operations.
//!
//! This module defines the plan structures that describe what actions
//! will be taken during an operation, without actually performing them.

use std::path::PathBuf;

use crate::path::ResolvedPath;

/// A single action to be taken during plan execution.
///
/// Each action corresponds to one filesystem call (or, for pruning, one
/// bounded loop of calls) performed when the plan is executed. Resolved paths
/// carry the virtual path used in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Remove a regular (or special) file.
    RemoveFile(ResolvedPath),

    /// Remove a directory that must be empty.
    RemoveEmptyDirectory(ResolvedPath),

    /// Create a single directory whose parent exists.
    CreateDirectory(ResolvedPath),

    /// Create a directory and every missing ancestor.
    CreateDirectoryChain(ResolvedPath),

    /// Atomically rename an entry to a free destination.
    Rename {
        /// The existing entry.
        from: ResolvedPath,
        /// The destination, which must not exist.
        to: ResolvedPath,
    },

    /// Create a symlink pointing at an absolute target.
    CreateLink {
        /// Where the link is created.
        link: ResolvedPath,
        /// The absolute path the link points to.
        target: PathBuf,
    },

    /// Remove a symlink, never its target.
    RemoveLink(ResolvedPath),

    /// Remove empty directories from `start` upward, stopping strictly
    /// below `stop_at`. Failures end the walk and are never reported.
    PruneEmptyParents {
        /// The first directory to try.
        start: PathBuf,
        /// The directory that is never removed.
        stop_at: PathBuf,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::RemoveFile(path) => format!("Remove file {}", path.virtual_path()),
            Self::RemoveEmptyDirectory(path) => {
                format!("Remove empty directory {}", path.virtual_path())
            }
            Self::CreateDirectory(path) => format!("Create directory {}", path.virtual_path()),
            Self::CreateDirectoryChain(path) => {
                format!("Create directory chain {}", path.virtual_path())
            }
            Self::Rename { from, to } => {
                format!("Rename {} to {}", from.virtual_path(), to.virtual_path())
            }
            Self::CreateLink { link, .. } => format!("Create share link {}", link.virtual_path()),
            Self::RemoveLink(link) => format!("Remove share link {}", link.virtual_path()),
            Self::PruneEmptyParents { .. } => "Prune empty parent directories".to_string(),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. Besides the actions and warnings they carry the
/// virtual paths reported to the caller on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,

    /// Forward-slash virtual paths reported on success.
    pub paths: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsgate::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Delete docs/a.txt");
    /// assert_eq!(plan.description, "Delete docs/a.txt");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsgate::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test")
    ///     .add_warning("This is a warning");
    ///
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Adds a result path to the plan.
    #[must_use]
    pub fn add_path(mut self, path: impl ToString) -> Self {
        self.paths.push(path.to_string());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
