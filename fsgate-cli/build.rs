//! Build script for fsgate-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("fsgate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Confined file management with public share links")
        .long_about(
            "Command-line tool for filesystem mutations confined to a single root directory, \
             with optional publishing of files as symlinks under a public root",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file")
                .value_name("PATH")
                .global(true)
                .env("FSGATE_CONFIG"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Directory that bounds every operation")
                .value_name("PATH")
                .global(true)
                .env("FSGATE_ROOT"),
        )
        .arg(
            Arg::new("public-root")
                .long("public-root")
                .help("Directory holding share links")
                .value_name("PATH")
                .global(true)
                .env("FSGATE_PUBLIC_ROOT"),
        )
        .subcommands(vec![
            Command::new("upload")
                .about("Upload local files into a directory")
                .long_about("Copy local files into a directory under the root without overwriting"),
            Command::new("delete")
                .about("Delete a file or an empty directory")
                .long_about("Remove a single file or an empty directory under the root"),
            Command::new("mkdir")
                .about("Create a directory")
                .long_about("Create a directory whose parent already exists"),
            Command::new("rename")
                .about("Rename a file or directory in place")
                .long_about("Give an entry a new name within its own directory"),
            Command::new("move")
                .about("Move a file or directory to a new path")
                .long_about("Move an entry to a destination under the root that does not exist yet"),
            Command::new("publish")
                .about("Publish files as share links")
                .long_about("Create symlinks under the public root mirroring each file's path"),
            Command::new("unpublish")
                .about("Remove a share link")
                .long_about("Remove a share link and any public directories left empty"),
            Command::new("list-public")
                .about("List files reachable through the public root")
                .long_about("List shared regular files, sorted, as paths relative to the public root"),
            Command::new("show-config")
                .about("Show the merged configuration")
                .long_about("Print the configuration merged from files, environment and flags"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("fsgate.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
