//! Upload command implementation.
//!
//! Copies local files into a directory under the root. Existing files are
//! never overwritten: they are reported as skipped. The command fails only
//! when no file at all could be written.

use crate::error::CliError;
use crate::utils::{open_service, print_json, GlobalOptions};
use clap::Args;
use fsgate::{BatchStatus, FileStatus, UploadFile};
use std::fs::File;
use std::path::PathBuf;

/// Upload local files into a directory under the root.
#[derive(Args)]
pub struct UploadCommand {
    /// Target directory relative to the root; created if missing
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: String,

    /// Local files to upload
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Store the file under a different name (single file only)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Per-file size ceiling in bytes, overriding the configuration
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<u64>,
}

impl UploadCommand {
    /// Execute the upload command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.name.is_some() && self.files.len() != 1 {
            return Err(CliError::InvalidArguments(
                "--name can only be used with a single file".to_string(),
            ));
        }
        if self.max_bytes == Some(0) {
            return Err(CliError::InvalidArguments(
                "--max-bytes must be greater than 0".to_string(),
            ));
        }

        let service = open_service(global, false)?;
        let mut options = service.upload_options().clone();
        if let Some(max_bytes) = self.max_bytes {
            options = options.with_max_bytes(max_bytes);
        }

        let mut uploads = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let name = match self.name {
                Some(ref name) => name.clone(),
                None => local_file_name(path)?,
            };
            uploads.push(UploadFile::new(name, File::open(path)?));
        }

        let report = service.upload_with(&self.target_dir, uploads, &options)?;

        if !global.quiet {
            for file in &report.files {
                if file.status != FileStatus::Uploaded {
                    if let Some(ref message) = file.message {
                        eprintln!("Warning: {}: {message}", file.name);
                    }
                }
            }
        }
        print_json(&report)?;

        match report.status {
            BatchStatus::Created => Ok(()),
            status => Err(CliError::Upload(status)),
        }
    }
}

fn local_file_name(path: &std::path::Path) -> Result<String, CliError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::InvalidArguments(format!(
                "cannot derive an upload name from {}; use --name",
                path.display()
            ))
        })
}
