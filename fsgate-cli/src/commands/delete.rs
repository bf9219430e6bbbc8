//! Delete command implementation.
//!
//! Removes a single file or an empty directory under the root.

use crate::error::CliError;
use crate::utils::{open_service, print_outcome, GlobalOptions};
use clap::Args;

/// Delete a file or an empty directory.
#[derive(Args)]
pub struct DeleteCommand {
    /// Path relative to the root
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteCommand {
    /// Execute the delete command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global, self.dry_run)?;
        let outcome = service.delete(&self.path)?;
        print_outcome(global, &outcome)
    }
}
