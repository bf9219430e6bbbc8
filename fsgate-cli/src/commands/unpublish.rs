//! Unpublish command implementation.
//!
//! Removes a share link and any public directories it leaves empty. The
//! shared file itself is never touched.

use crate::error::CliError;
use crate::utils::{open_service, print_outcome, GlobalOptions};
use clap::Args;

/// Remove a share link from the public root.
#[derive(Args)]
pub struct UnpublishCommand {
    /// Path of the share link, relative to the public root
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl UnpublishCommand {
    /// Execute the unpublish command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global, self.dry_run)?;
        let outcome = service.unpublish(&self.path)?;
        print_outcome(global, &outcome)
    }
}
