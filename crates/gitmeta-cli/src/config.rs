use crate::cli::Cli;
use gitmeta_core::{CaptureOptions, OwnerCapture, RestoreOptions};
use std::path::PathBuf;

/// Settings for one invocation, built once from the command line.
#[derive(Debug, Clone)]
pub struct MetaConfig {
    pub data: PathBuf,
    pub force: bool,
    pub add_to_git: bool,
    pub capture: CaptureOptions,
    pub restore: RestoreOptions,
    pub verbosity: u8,
}

impl MetaConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data: cli.data.clone(),
            force: cli.force,
            add_to_git: cli.add_to_git,
            capture: CaptureOptions {
                owner: OwnerCapture::from_flags(cli.numeric_owner, cli.owner),
            },
            restore: RestoreOptions {
                skip_perms: cli.skip_perms,
                skip_mtime: cli.skip_mtime,
                skip_user: cli.skip_user,
                skip_group: cli.skip_group,
            },
            verbosity: cli.verbose,
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
