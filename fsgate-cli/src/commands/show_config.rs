//! Show-config command implementation.
//!
//! Prints the merged configuration as YAML, even when it would not pass
//! validation, so a broken setup can be inspected.

use crate::error::CliError;
use crate::utils::{load_partial_configuration, GlobalOptions};
use clap::Args;

/// Show the merged configuration.
#[derive(Args)]
pub struct ShowConfigCommand {}

impl ShowConfigCommand {
    /// Execute the show-config command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_partial_configuration(global)?;
        let yaml = serde_yaml::to_string(&config).map_err(fsgate::Error::from)?;
        print!("{yaml}");
        Ok(())
    }
}
