//! Mkdir command implementation.

use crate::error::CliError;
use crate::utils::{open_service, print_outcome, GlobalOptions};
use clap::Args;

/// Create a directory whose parent already exists.
#[derive(Args)]
pub struct MkdirCommand {
    /// Path of the new directory, relative to the root
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl MkdirCommand {
    /// Execute the mkdir command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global, self.dry_run)?;
        let outcome = service.mkdir(&self.path)?;
        print_outcome(global, &outcome)
    }
}
