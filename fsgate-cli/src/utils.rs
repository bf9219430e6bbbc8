//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, service construction, and JSON output.

use crate::error::CliError;
use fsgate::{Config, ConfigBuilder, FileService, Outcome};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // `verbose` is consumed by logger setup in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Override the primary root.
    pub root: Option<PathBuf>,

    /// Override the public root.
    pub public_root: Option<PathBuf>,
}

impl GlobalOptions {
    /// The flag values as the highest-precedence configuration layer.
    fn overrides(&self) -> Config {
        Config {
            root: self.root.clone(),
            public_root: self.public_root.clone(),
            ..Config::default()
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Explicit `--config` file
/// 4. User configuration file
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    configuration_builder(global)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Load configuration without validating it, for display.
pub fn load_partial_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    configuration_builder(global)
        .skip_validation()
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn configuration_builder(global: &GlobalOptions) -> ConfigBuilder {
    let mut builder = ConfigBuilder::new();
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }
    builder.with_config(global.overrides())
}

/// Build a file service from the merged configuration.
///
/// With `dry_run`, planned operations are reported but not executed.
pub fn open_service(global: &GlobalOptions, dry_run: bool) -> Result<FileService, CliError> {
    let config = load_configuration(global)?;
    let service =
        FileService::from_config(&config).map_err(|e| CliError::Config(e.to_string()))?;
    log::debug!("serving {}", service.roots().root().display());
    Ok(if dry_run { service.dry_run() } else { service })
}

/// Print `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

/// Report a completed operation: warnings to stderr, the outcome as JSON.
pub fn print_outcome(global: &GlobalOptions, outcome: &Outcome) -> Result<(), CliError> {
    print_warnings(global, &outcome.warnings);
    if outcome.dry_run && !global.quiet {
        eprintln!("Dry run - no changes were made");
    }
    print_json(outcome)
}

/// Print warnings to stderr unless quiet.
pub fn print_warnings(global: &GlobalOptions, warnings: &[String]) {
    if global.quiet {
        return;
    }
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}
