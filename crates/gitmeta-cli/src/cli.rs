use clap::{ArgAction, Parser, Subcommand};
use gitmeta_core::DEFAULT_DATA_FILE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "git-meta")]
#[command(about = "Store and restore file metadata that git does not track")]
#[command(after_help = "Flags may be given before or after the command.")]
pub struct Cli {
    /// Path to the metadata database
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,
    /// Force to commit (reserved)
    #[arg(short = 'f', long, global = true)]
    pub force: bool,
    /// Record symbolic user and group names
    #[arg(short = 'O', long, global = true)]
    pub owner: bool,
    /// Record numeric uid and gid (wins over --owner)
    #[arg(short = 'o', long, global = true)]
    pub numeric_owner: bool,
    /// Commit the database to git (reserved)
    #[arg(short = 'a', long, global = true)]
    pub add_to_git: bool,
    /// Do not restore the file owner
    #[arg(short = 'U', long, global = true)]
    pub skip_user: bool,
    /// Do not restore the file group
    #[arg(short = 'G', long, global = true)]
    pub skip_group: bool,
    /// Do not restore permissions
    #[arg(short = 'P', long, global = true)]
    pub skip_perms: bool,
    /// Do not restore modification times
    #[arg(short = 'M', long, global = true)]
    pub skip_mtime: bool,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Set up hooks in the .git directory
    Init,
    /// Store metadata of tracked files
    Get,
    /// Restore metadata onto tracked files
    Set,
    /// Print the stored metadata
    Dump,
}
