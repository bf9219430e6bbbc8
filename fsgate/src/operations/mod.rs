//! Filesystem operations using the plan-execute pattern.
//!
//! # Architecture
//!
//! Operations other than upload are split into two phases:
//! 1. **Planning**: resolves and validates the request against the roots and
//!    builds an [`OperationPlan`] without mutating anything
//! 2. **Execution**: [`PlanExecutor`] performs the planned actions and maps
//!    failures to the error taxonomy
//!
//! Uploads stream their content and call the write primitive directly; the
//! share listing only reads.
//!
//! # Examples
//!
//! ```no_run
//! use fsgate::operations::{MovePlan, PlanExecutor};
//! use fsgate::Roots;
//! use std::path::Path;
//!
//! let roots = Roots::new(Path::new("/srv/files")).unwrap();
//!
//! // Generate plan
//! let plan = MovePlan::new("inbox/a.txt", "archive/a.txt")
//!     .build_plan(&roots)
//!     .unwrap();
//!
//! // Execute plan
//! let result = PlanExecutor::new().execute(&plan).unwrap();
//! assert_eq!(result.paths, vec!["inbox/a.txt", "archive/a.txt"]);
//! ```

pub mod delete;
pub mod executor;
pub mod list;
pub mod mkdir;
pub mod plan;
pub mod publish;
pub mod rename;
pub mod upload;

pub use delete::DeletePlan;
pub use executor::{ExecutionResult, PlanExecutor};
pub use list::list_public;
pub use mkdir::MkdirPlan;
pub use plan::{OperationPlan, PlanAction};
pub use publish::{PublishPlan, UnpublishPlan};
pub use rename::{MovePlan, RenamePlan};
pub use upload::{
    upload_batch, write_exclusive, BatchStatus, CancelFlag, FileReport, FileStatus, UploadFile,
    UploadOptions, UploadReport,
};
