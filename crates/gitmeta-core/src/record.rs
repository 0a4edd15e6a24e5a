//! Per-file metadata record and its wire row encoding.
//!
//! A record travels as a JSON array: `[path, mode, mtime]`, or
//! `[path, mode, mtime, user, group]` when ownership was captured. The
//! trailing pair is modelled as an explicit `Option<Ownership>` here; row
//! length is only inspected while decoding.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// A user or group as stored in the database: numeric id or symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Principal {
    Id(u32),
    Name(String),
}

/// Captured owner of a file. User and group resolve independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    pub user: Principal,
    pub group: Principal,
}

impl Ownership {
    pub fn numeric(uid: u32, gid: u32) -> Self {
        Self {
            user: Principal::Id(uid),
            group: Principal::Id(gid),
        }
    }

    pub fn symbolic(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            user: Principal::Name(user.into()),
            group: Principal::Name(group.into()),
        }
    }
}

/// Metadata captured for one tracked file.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    /// Path relative to the repository working directory.
    pub path: String,
    /// Full `st_mode`, file-type bits included.
    pub mode: u32,
    /// Modification time in seconds since the epoch.
    pub mtime: f64,
    pub owner: Option<Ownership>,
}

impl MetadataRecord {
    pub fn new(path: impl Into<String>, mode: u32, mtime: f64) -> Self {
        Self {
            path: path.into(),
            mode,
            mtime,
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: Ownership) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Permission bits only (`0o7777`), suitable for chmod.
    pub fn permissions(&self) -> u32 {
        self.mode & 0o7777
    }

    /// Split `mtime` into whole seconds and nanoseconds.
    pub fn mtime_parts(&self) -> (i64, u32) {
        let secs = self.mtime.floor();
        let nanos = ((self.mtime - secs) * NANOS_PER_SEC).round();
        if nanos >= NANOS_PER_SEC {
            (secs as i64 + 1, 0)
        } else {
            (secs as i64, nanos.max(0.0) as u32)
        }
    }
}

impl Serialize for MetadataRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.owner.is_some() { 5 } else { 3 };
        let mut row = serializer.serialize_seq(Some(len))?;
        row.serialize_element(&self.path)?;
        row.serialize_element(&self.mode)?;
        row.serialize_element(&self.mtime)?;
        if let Some(owner) = &self.owner {
            row.serialize_element(&owner.user)?;
            row.serialize_element(&owner.group)?;
        }
        row.end()
    }
}

impl<'de> Deserialize<'de> for MetadataRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RowVisitor)
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = MetadataRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of 3 or 5 fields [path, mode, mtime, user?, group?]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let path: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let mode: u32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let mtime: f64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(2, &self))?;

        let owner = match seq.next_element::<Principal>()? {
            None => None,
            Some(user) => {
                let group: Principal = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                Some(Ownership { user, group })
            }
        };

        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(6, &self));
        }

        Ok(MetadataRecord {
            path,
            mode,
            mtime,
            owner,
        })
    }
}
