use crate::config::MetaConfig;
use eyre::Result;
use gitmeta_core::{collector, dumper, restorer, Snapshot};
use std::io;
use std::path::Path;

pub fn run_get(cfg: &MetaConfig, root: &Path) -> Result<()> {
    if cfg.force || cfg.add_to_git {
        log::debug!(
            "--force/--add-to-git are reserved and have no effect (force={}, add_to_git={})",
            cfg.force,
            cfg.add_to_git
        );
    }

    let (snapshot, summary) = collector::collect(root, &cfg.capture)?;
    snapshot.save(&root.join(&cfg.data))?;

    log::info!(
        "captured {} file(s) into {} ({} tracked, {} skipped)",
        summary.captured,
        cfg.data.display(),
        summary.tracked,
        summary.skipped
    );
    Ok(())
}

pub fn run_set(cfg: &MetaConfig, root: &Path) -> Result<()> {
    let snapshot = Snapshot::load(&root.join(&cfg.data))?;
    let summary = restorer::restore(root, &snapshot, &cfg.restore)?;

    log::info!(
        "restored {} file(s) from {} ({} chmod, {} utime, {} chown)",
        summary.files,
        cfg.data.display(),
        summary.chmods,
        summary.utimes,
        summary.chowns
    );
    Ok(())
}

pub fn run_dump(cfg: &MetaConfig, root: &Path) -> Result<()> {
    let snapshot = Snapshot::load(&root.join(&cfg.data))?;
    dumper::dump(&snapshot, io::stdout().lock())
}
