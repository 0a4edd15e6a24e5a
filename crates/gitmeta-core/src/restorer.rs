//! Apply a stored snapshot back onto the working tree.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use eyre::{bail, Context, Result};
use filetime::{set_file_times, FileTime};

use crate::accounts;
use crate::record::{MetadataRecord, Ownership, Principal};
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, Default)]
pub struct RestoreOptions {
    pub skip_perms: bool,
    pub skip_mtime: bool,
    pub skip_user: bool,
    pub skip_group: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub files: usize,
    pub chmods: usize,
    pub utimes: usize,
    pub chowns: usize,
}

/// Restore every record in snapshot order. The first failure aborts the run;
/// files handled before it keep their new metadata.
pub fn restore(
    root: &Path,
    snapshot: &Snapshot,
    options: &RestoreOptions,
) -> Result<RestoreSummary> {
    let mut summary = RestoreSummary::default();
    for record in snapshot {
        restore_record(root, record, options, &mut summary)
            .with_context(|| format!("failed to restore metadata for {}", record.path))?;
        summary.files += 1;
    }
    Ok(summary)
}

fn restore_record(
    root: &Path,
    record: &MetadataRecord,
    options: &RestoreOptions,
    summary: &mut RestoreSummary,
) -> Result<()> {
    let path = root.join(&record.path);
    if fs::symlink_metadata(&path).is_err() {
        bail!("{}: no such file", record.path);
    }

    if !options.skip_perms {
        fs::set_permissions(&path, fs::Permissions::from_mode(record.permissions()))
            .context("chmod")?;
        summary.chmods += 1;
    }

    if !options.skip_mtime {
        let (secs, nanos) = record.mtime_parts();
        let time = FileTime::from_unix_time(secs, nanos);
        set_file_times(&path, time, time).context("utime")?;
        summary.utimes += 1;
    }

    if let Some(owner) = &record.owner {
        let (uid, gid) = resolve_owner(owner, options)?;
        if uid.is_some() || gid.is_some() {
            std::os::unix::fs::chown(&path, uid, gid).context("chown")?;
            summary.chowns += 1;
        }
    }

    log::debug!("restored {}", record.path);
    Ok(())
}

/// Target ids for chown; `None` leaves that side unchanged.
fn resolve_owner(
    owner: &Ownership,
    options: &RestoreOptions,
) -> Result<(Option<u32>, Option<u32>)> {
    let uid = if options.skip_user {
        None
    } else {
        Some(match &owner.user {
            Principal::Id(uid) => *uid,
            Principal::Name(name) => accounts::uid_for(name)?,
        })
    };
    let gid = if options.skip_group {
        None
    } else {
        Some(match &owner.group {
            Principal::Id(gid) => *gid,
            Principal::Name(name) => accounts::gid_for(name)?,
        })
    };
    Ok((uid, gid))
}
