//! Line records for the two reconciliation inputs.
//!
//! Both parsers are tolerant: a line with too few fields yields `None` and the
//! caller moves on to the next line.

use serde::Serialize;
use std::fmt;

/// Separator between the segments of a directory listing line.
pub const DIRECTORY_SEPARATOR: char = '/';

/// Separator between the fields of a database export line.
pub const DATABASE_SEPARATOR: char = ';';

/// One file of the moodledata listing: `<bucket1>/<bucket2>/<hash>[/...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub bucket1: String,
    pub bucket2: String,
    pub hash: String,
}

impl DirectoryEntry {
    /// Parse a listing line; segments after the third are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut segments = line.trim().split(DIRECTORY_SEPARATOR);
        let bucket1 = segments.next()?;
        let bucket2 = segments.next()?;
        let hash = segments.next()?;
        Some(Self {
            bucket1: bucket1.to_string(),
            bucket2: bucket2.to_string(),
            hash: hash.to_string(),
        })
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.bucket1, self.bucket2, self.hash)
    }
}

/// One row of the database export: `<hash>;<path>;<name>;<size>[;...]`.
///
/// `path` and `size` are never interpreted, only carried along for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseEntry {
    pub hash: String,
    pub path: String,
    pub name: String,
    pub size: String,
}

impl DatabaseEntry {
    /// Parse an export row; fields after the fourth are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.trim().split(DATABASE_SEPARATOR);
        let hash = fields.next()?;
        let path = fields.next()?;
        let name = fields.next()?;
        let size = fields.next()?;
        Some(Self {
            hash: hash.to_string(),
            path: path.to_string(),
            name: name.to_string(),
            size: size.to_string(),
        })
    }

    /// Storage buckets for this row's hash, see [`hash_buckets`].
    pub fn buckets(&self) -> (String, String) {
        hash_buckets(&self.hash)
    }
}

/// Derive the two bucket names from a content hash.
///
/// `bucket1` is the first two characters and `bucket2` the next two. Hashes
/// shorter than four characters produce shorter (possibly empty) buckets.
pub fn hash_buckets(hash: &str) -> (String, String) {
    let bucket1: String = hash.chars().take(2).collect();
    let bucket2: String = hash.chars().skip(2).take(2).collect();
    (bucket1, bucket2)
}
