//! List-public command implementation.

use crate::error::CliError;
use crate::utils::{open_service, print_json, GlobalOptions};
use clap::Args;

/// List files reachable through the public root.
#[derive(Args)]
pub struct ListPublicCommand {}

impl ListPublicCommand {
    /// Execute the list-public command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let service = open_service(global, false)?;
        let paths = service.list_public()?;
        print_json(&paths)
    }
}
