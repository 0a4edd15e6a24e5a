//! Capture metadata for every regular file tracked by git.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use eyre::{Context, Result};

use crate::accounts;
use crate::git;
use crate::record::{MetadataRecord, Ownership};
use crate::snapshot::Snapshot;

/// Which form of ownership, if any, goes into each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerCapture {
    #[default]
    None,
    /// uid/gid as stored by the filesystem.
    Numeric,
    /// User and group names from the account databases.
    Symbolic,
}

impl OwnerCapture {
    /// Numeric wins when both flags are given.
    pub fn from_flags(numeric: bool, symbolic: bool) -> Self {
        if numeric {
            OwnerCapture::Numeric
        } else if symbolic {
            OwnerCapture::Symbolic
        } else {
            OwnerCapture::None
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureOptions {
    pub owner: OwnerCapture,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSummary {
    pub tracked: usize,
    pub captured: usize,
    pub skipped: usize,
}

/// List tracked files under `root` and read their metadata.
pub fn collect(root: &Path, options: &CaptureOptions) -> Result<(Snapshot, CaptureSummary)> {
    let paths = git::list_tracked_files(root)?;
    collect_paths(root, paths, options)
}

/// Read metadata for `paths` (relative to `root`). Anything that is not a
/// regular file right now is left out.
pub fn collect_paths(
    root: &Path,
    mut paths: Vec<String>,
    options: &CaptureOptions,
) -> Result<(Snapshot, CaptureSummary)> {
    paths.sort();
    paths.dedup();

    let mut summary = CaptureSummary {
        tracked: paths.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(paths.len());

    for path in paths {
        let full = root.join(&path);
        let md = match fs::metadata(&full) {
            Ok(md) if md.is_file() => md,
            Ok(_) => {
                log::debug!("skipping {path}: not a regular file");
                summary.skipped += 1;
                continue;
            }
            // Stale index entries fail in many ways (ENOENT, ENOTDIR, ELOOP).
            Err(err) => {
                log::debug!("skipping {path}: {err}");
                summary.skipped += 1;
                continue;
            }
        };

        let owner = capture_owner(&md, options.owner)
            .with_context(|| format!("failed to read owner of {path}"))?;
        records.push(MetadataRecord {
            path,
            mode: md.mode(),
            mtime: mtime_seconds(&md),
            owner,
        });
    }

    summary.captured = records.len();
    Ok((Snapshot::new(records), summary))
}

fn mtime_seconds(md: &fs::Metadata) -> f64 {
    md.mtime() as f64 + md.mtime_nsec() as f64 / 1_000_000_000.0
}

fn capture_owner(md: &fs::Metadata, mode: OwnerCapture) -> Result<Option<Ownership>> {
    Ok(match mode {
        OwnerCapture::None => None,
        OwnerCapture::Numeric => Some(Ownership::numeric(md.uid(), md.gid())),
        OwnerCapture::Symbolic => Some(Ownership::symbolic(
            accounts::user_name(md.uid())?,
            accounts::group_name(md.gid())?,
        )),
    })
}
