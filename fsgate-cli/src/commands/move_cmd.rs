//! Move command implementation.

use crate::error::CliError;
use crate::utils::{open_service, print_outcome, GlobalOptions};
use clap::Args;

/// Move a file or directory to a new path under the root.
#[derive(Args)]
pub struct MoveCommand {
    /// Source path relative to the root
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Destination path relative to the root; must not exist
    #[arg(value_name = "DEST")]
    pub destination: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl MoveCommand {
    /// Execute the move command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global, self.dry_run)?;
        let outcome = service.move_path(&self.source, &self.destination)?;
        print_outcome(global, &outcome)
    }
}
