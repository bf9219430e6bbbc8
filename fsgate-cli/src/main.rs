//! Main entry point for the fsgate CLI.
//!
//! This is the command-line interface for confined filesystem operations.
//! Every path argument is relative to the configured root; nothing outside
//! it can be modified. Results are printed as JSON on stdout.

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    if let Err(e) = fsgate::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        root: cli.root,
        public_root: cli.public_root,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Upload(cmd) => cmd.execute(&global),
        cli::Command::Delete(cmd) => cmd.execute(&global),
        cli::Command::Mkdir(cmd) => cmd.execute(&global),
        cli::Command::Rename(cmd) => cmd.execute(&global),
        cli::Command::Move(cmd) => cmd.execute(&global),
        cli::Command::Publish(cmd) => cmd.execute(&global),
        cli::Command::Unpublish(cmd) => cmd.execute(&global),
        cli::Command::ListPublic(cmd) => cmd.execute(&global),
        cli::Command::ShowConfig(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
