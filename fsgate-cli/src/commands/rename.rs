//! Rename command implementation.
//!
//! Renames an entry within its own directory. The new name must be a bare
//! name; use `move` to change directories.

use crate::error::CliError;
use crate::utils::{open_service, print_outcome, GlobalOptions};
use clap::Args;

/// Rename a file or directory in place.
#[derive(Args)]
pub struct RenameCommand {
    /// Path relative to the root
    #[arg(value_name = "PATH")]
    pub path: String,

    /// New name, without separators
    #[arg(value_name = "NEW_NAME")]
    pub new_name: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl RenameCommand {
    /// Execute the rename command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global, self.dry_run)?;
        let outcome = service.rename(&self.path, &self.new_name)?;
        print_outcome(global, &outcome)
    }
}
