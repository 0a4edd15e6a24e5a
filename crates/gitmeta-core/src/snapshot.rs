//! Snapshot database: the ordered record list persisted as a flat JSON array.

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use eyre::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::record::MetadataRecord;

/// All records captured in one `get` run, in path order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<MetadataRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<MetadataRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read a database file written by [`Snapshot::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open metadata database {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse metadata database {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<MetadataRecord> =
            serde_json::from_reader(reader).context("decode snapshot records")?;
        Ok(Self { records })
    }

    /// Write the database, truncating any previous content.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        self.to_writer(&mut buf)?;
        fs::write(path, buf)
            .with_context(|| format!("failed to write metadata database {}", path.display()))
    }

    /// One value per line with no indentation and no trailing newline.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.records
            .serialize(&mut ser)
            .context("encode snapshot records")
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a MetadataRecord;
    type IntoIter = std::slice::Iter<'a, MetadataRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
