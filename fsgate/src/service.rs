//! The boundary facade transports call into.
//!
//! [`FileService`] bundles the roots with the upload policy and exposes one
//! method per operation. It logs unexpected failures with their OS cause
//! (which callers never see) and successes at debug level.

use std::io::Read;
use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::error::{ErrorKind, Result};
use crate::operations::{
    list_public, upload_batch, DeletePlan, ExecutionResult, MkdirPlan, MovePlan, OperationPlan,
    PlanExecutor, PublishPlan, RenamePlan, UnpublishPlan, UploadFile, UploadOptions, UploadReport,
};
use crate::path::Roots;

/// Success value of a non-upload operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Affected virtual paths, forward-slash separated.
    pub paths: Vec<String>,
    /// Non-fatal notes, such as an already published file.
    pub warnings: Vec<String>,
    /// Whether nothing was changed because of dry-run mode.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
    /// Actions that were (or would have been) performed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
}

impl From<ExecutionResult> for Outcome {
    fn from(result: ExecutionResult) -> Self {
        Self {
            paths: result.paths,
            warnings: result.warnings,
            dry_run: result.dry_run,
            actions: if result.dry_run {
                result.actions_taken
            } else {
                Vec::new()
            },
        }
    }
}

/// Confined filesystem operations over a fixed pair of roots.
///
/// Cheap to clone and safe to share between request handlers.
///
/// # Examples
///
/// ```no_run
/// use fsgate::{FileService, Roots};
/// use std::path::Path;
///
/// let roots = Roots::new(Path::new("/srv/files")).unwrap();
/// let service = FileService::new(roots);
///
/// service.mkdir("inbox").unwrap();
/// let outcome = service.rename("inbox", "incoming").unwrap();
/// assert_eq!(outcome.paths, vec!["inbox", "incoming"]);
/// ```
#[derive(Debug, Clone)]
pub struct FileService {
    roots: Arc<Roots>,
    upload_options: UploadOptions,
    dry_run: bool,
}

impl FileService {
    /// Creates a service with default upload options.
    #[must_use]
    pub fn new(roots: Roots) -> Self {
        Self {
            roots: Arc::new(roots),
            upload_options: UploadOptions::new(),
            dry_run: false,
        }
    }

    /// Creates a service from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured roots are unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Roots::from_config(config)?)
            .with_upload_options(UploadOptions::from_config(config)))
    }

    /// Replaces the default upload options.
    #[must_use]
    pub fn with_upload_options(mut self, options: UploadOptions) -> Self {
        self.upload_options = options;
        self
    }

    /// Plan operations without executing them.
    ///
    /// Uploads are not affected.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// The roots this service is bounded by.
    #[must_use]
    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    /// The default upload options.
    #[must_use]
    pub const fn upload_options(&self) -> &UploadOptions {
        &self.upload_options
    }

    /// Uploads `files` into `target_dir` with the service's upload options.
    ///
    /// # Errors
    ///
    /// See [`upload_batch`].
    pub fn upload<R: Read>(
        &self,
        target_dir: &str,
        files: Vec<UploadFile<R>>,
    ) -> Result<UploadReport> {
        self.upload_with(target_dir, files, &self.upload_options)
    }

    /// Uploads with explicit options, e.g. to attach a cancellation flag.
    ///
    /// # Errors
    ///
    /// See [`upload_batch`].
    pub fn upload_with<R: Read>(
        &self,
        target_dir: &str,
        files: Vec<UploadFile<R>>,
        options: &UploadOptions,
    ) -> Result<UploadReport> {
        let report = logged("upload", upload_batch(&self.roots, target_dir, files, options))?;
        log::debug!("upload to {}: {:?}", report.target, report.status);
        Ok(report)
    }

    /// Deletes a file or an empty directory.
    ///
    /// # Errors
    ///
    /// See [`DeletePlan::build_plan`].
    pub fn delete(&self, path: &str) -> Result<Outcome> {
        self.run("delete", DeletePlan::new(path).build_plan(&self.roots))
    }

    /// Creates a single directory.
    ///
    /// # Errors
    ///
    /// See [`MkdirPlan::build_plan`].
    pub fn mkdir(&self, path: &str) -> Result<Outcome> {
        self.run("mkdir", MkdirPlan::new(path).build_plan(&self.roots))
    }

    /// Renames an entry within its directory.
    ///
    /// # Errors
    ///
    /// See [`RenamePlan::build_plan`].
    pub fn rename(&self, path: &str, new_name: &str) -> Result<Outcome> {
        self.run("rename", RenamePlan::new(path, new_name).build_plan(&self.roots))
    }

    /// Moves an entry to a new path.
    ///
    /// # Errors
    ///
    /// See [`MovePlan::build_plan`].
    pub fn move_path(&self, source: &str, destination: &str) -> Result<Outcome> {
        self.run("move", MovePlan::new(source, destination).build_plan(&self.roots))
    }

    /// Publishes a regular file under the public root.
    ///
    /// # Errors
    ///
    /// See [`PublishPlan::build_plan`].
    pub fn publish(&self, path: &str) -> Result<Outcome> {
        self.run("publish", PublishPlan::new(path).build_plan(&self.roots))
    }

    /// Removes a share link.
    ///
    /// # Errors
    ///
    /// See [`UnpublishPlan::build_plan`].
    pub fn unpublish(&self, path: &str) -> Result<Outcome> {
        self.run("unpublish", UnpublishPlan::new(path).build_plan(&self.roots))
    }

    /// Lists the files reachable through the public root.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if sharing is not configured.
    pub fn list_public(&self) -> Result<Vec<String>> {
        logged("list-public", list_public(&self.roots))
    }

    fn run(&self, operation: &str, plan: Result<OperationPlan>) -> Result<Outcome> {
        let plan = logged(operation, plan)?;
        let executor = if self.dry_run {
            PlanExecutor::new().dry_run()
        } else {
            PlanExecutor::new()
        };
        let result = logged(operation, executor.execute(&plan))?;
        log::debug!("{}: done", plan.description);
        Ok(result.into())
    }
}

/// Logs unexpected failures with their OS cause; passes the result through.
fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(ref e) = result {
        if e.kind() == ErrorKind::Internal {
            match std::error::Error::source(e) {
                Some(source) => log::error!("{operation}: {e}: {source}"),
                None => log::error!("{operation}: {e}"),
            }
        } else {
            log::debug!("{operation} rejected: {e}");
        }
    }
    result
}
