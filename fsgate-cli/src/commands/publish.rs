//! Publish command implementation.
//!
//! Publishes one or more files as share links. Every path is attempted even
//! after a failure, so re-publishing a list of files rebuilds the public
//! tree as far as possible; the exit code reflects the first failure.

use crate::error::CliError;
use crate::utils::{open_service, print_json, print_warnings, GlobalOptions};
use clap::Args;
use serde::Serialize;

/// Publish files under the public root.
#[derive(Args)]
pub struct PublishCommand {
    /// Paths of regular files, relative to the root
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

/// Per-path result line of the JSON report.
#[derive(Debug, Serialize)]
struct PublishEntry {
    path: String,
    published: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl PublishCommand {
    /// Execute the publish command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global, self.dry_run)?;

        let mut entries = Vec::with_capacity(self.paths.len());
        let mut first_error = None;

        for path in self.paths {
            match service.publish(&path) {
                Ok(outcome) => {
                    print_warnings(global, &outcome.warnings);
                    entries.push(PublishEntry {
                        path,
                        published: !outcome.dry_run,
                        warnings: outcome.warnings,
                        error: None,
                    });
                }
                Err(e) => {
                    if !global.quiet {
                        eprintln!("Error: {path}: {e}");
                    }
                    entries.push(PublishEntry {
                        path,
                        published: false,
                        warnings: Vec::new(),
                        error: Some(e.to_string()),
                    });
                    first_error.get_or_insert(e);
                }
            }
        }

        if self.dry_run && !global.quiet {
            eprintln!("Dry run - no changes were made");
        }
        print_json(&entries)?;

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}
