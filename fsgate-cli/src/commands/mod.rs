//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `upload`: Upload local files into a directory
//! - `delete`: Delete a file or empty directory
//! - `mkdir`: Create a directory
//! - `rename`: Rename an entry in place
//! - `move`: Move an entry to a new path
//! - `publish`: Publish files as share links
//! - `unpublish`: Remove a share link
//! - `list-public`: List shared files
//! - `show-config`: Show the merged configuration
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod delete;
pub mod list_public;
pub mod mkdir;
pub mod move_cmd;
pub mod publish;
pub mod rename;
pub mod show_config;
pub mod unpublish;
pub mod upload;

pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use list_public::ListPublicCommand;
pub use mkdir::MkdirCommand;
pub use move_cmd::MoveCommand;
pub use publish::PublishCommand;
pub use rename::RenameCommand;
pub use show_config::ShowConfigCommand;
pub use unpublish::UnpublishCommand;
pub use upload::UploadCommand;
