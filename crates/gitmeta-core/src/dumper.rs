use std::io::Write;

use eyre::{Context, Result};

use crate::snapshot::Snapshot;

/// Write the snapshot as 2-space indented JSON followed by a newline.
pub fn dump<W: Write>(snapshot: &Snapshot, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, snapshot.records()).context("render snapshot")?;
    writeln!(writer).context("write dump output")?;
    Ok(())
}
