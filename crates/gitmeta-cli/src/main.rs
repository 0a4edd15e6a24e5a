mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Commands};
use config::MetaConfig;
use eyre::Result;
use gitmeta_core::CommandError;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let cfg = MetaConfig::from_cli(&cli);
    init_logging(&cfg);

    let root = Path::new(".");
    let outcome = match cli.command {
        Commands::Init => {
            eprintln!("init: hook installation is not implemented");
            return Ok(ExitCode::from(2));
        }
        Commands::Get => commands::run_get(&cfg, root),
        Commands::Set => commands::run_set(&cfg, root),
        Commands::Dump => commands::run_dump(&cfg, root),
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<CommandError>() {
            Some(cmd_err) => {
                report_command_failure(cmd_err);
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

/// Diagnostic line on stdout, the child's stderr passed through verbatim.
fn report_command_failure(err: &CommandError) {
    println!("{err}");
    let mut stderr = std::io::stderr().lock();
    let _ = stderr.write_all(&err.stderr);
    let _ = stderr.flush();
}

fn init_logging(cfg: &MetaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
