//! Capture and restore file metadata (mode, mtime, owner) that git does not
//! track, using a JSON database stored next to the working tree.

#[cfg(not(unix))]
compile_error!("gitmeta-core relies on Unix file modes and ownership");

pub mod accounts;
pub mod collector;
pub mod command;
pub mod dumper;
pub mod errors;
pub mod git;
pub mod record;
pub mod restorer;
pub mod snapshot;

pub use collector::{collect, CaptureOptions, CaptureSummary, OwnerCapture};
pub use errors::CommandError;
pub use record::{MetadataRecord, Ownership, Principal};
pub use restorer::{restore, RestoreOptions, RestoreSummary};
pub use snapshot::Snapshot;

/// Default database location, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = ".metadata";
