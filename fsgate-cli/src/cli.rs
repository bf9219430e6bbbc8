//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, DeleteCommand, ListPublicCommand, MkdirCommand, MoveCommand,
    PublishCommand, RenameCommand, ShowConfigCommand, UnpublishCommand, UploadCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for confined filesystem mutations and share links.
#[derive(Parser)]
#[command(name = "fsgate")]
#[command(version, about = "Confined file management with public share links", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file
    #[arg(long, value_name = "PATH", global = true, env = "FSGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that bounds every operation
    #[arg(long, value_name = "PATH", global = true, env = "FSGATE_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory holding share links
    #[arg(long, value_name = "PATH", global = true, env = "FSGATE_PUBLIC_ROOT")]
    pub public_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Upload local files into a directory
    Upload(UploadCommand),

    /// Delete a file or an empty directory
    Delete(DeleteCommand),

    /// Create a directory
    Mkdir(MkdirCommand),

    /// Rename a file or directory in place
    Rename(RenameCommand),

    /// Move a file or directory to a new path
    Move(MoveCommand),

    /// Publish files as share links
    Publish(PublishCommand),

    /// Remove a share link
    Unpublish(UnpublishCommand),

    /// List files reachable through the public root
    ListPublic(ListPublicCommand),

    /// Show the merged configuration
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
