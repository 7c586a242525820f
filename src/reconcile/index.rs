//! Two-level bucket index of the moodledata listing.

use crate::error::ToolError;
use crate::reconcile::entry::DirectoryEntry;
use crate::reconcile::lines::FileLines;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// `bucket1 -> bucket2 -> hashes` of listed files that are not matched yet.
///
/// Empty levels are pruned on every removal, so whatever is left in the index
/// is exactly the set of unmatched files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryIndex {
    buckets: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    len: usize,
}

impl DirectoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from listing lines. Lines with fewer than three
    /// segments are skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for line in lines {
            if let Some(entry) = DirectoryEntry::parse(line.as_ref()) {
                index.insert(entry);
            }
        }
        index
    }

    /// Stream a listing file into an index.
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let mut index = Self::new();
        let mut lines_read = 0usize;
        let mut skipped = 0usize;
        for line in FileLines::open(path)? {
            let line = line?;
            lines_read += 1;
            match DirectoryEntry::parse(&line) {
                Some(entry) => {
                    index.insert(entry);
                }
                None => skipped += 1,
            }
        }
        debug!(
            path = %path.display(),
            lines = lines_read,
            skipped,
            entries = index.len(),
            "Directory listing loaded"
        );
        Ok(index)
    }

    /// Insert an entry; returns false if it was already present.
    pub fn insert(&mut self, entry: DirectoryEntry) -> bool {
        let inserted = self
            .buckets
            .entry(entry.bucket1)
            .or_default()
            .entry(entry.bucket2)
            .or_default()
            .insert(entry.hash);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn contains(&self, bucket1: &str, bucket2: &str, hash: &str) -> bool {
        self.buckets
            .get(bucket1)
            .and_then(|level2| level2.get(bucket2))
            .is_some_and(|hashes| hashes.contains(hash))
    }

    /// Remove a hash, pruning `bucket2` and `bucket1` when they become empty.
    /// Returns false when the hash was not in that bucket.
    pub fn remove(&mut self, bucket1: &str, bucket2: &str, hash: &str) -> bool {
        let Some(level2) = self.buckets.get_mut(bucket1) else {
            return false;
        };
        let Some(hashes) = level2.get_mut(bucket2) else {
            return false;
        };
        if !hashes.remove(hash) {
            return false;
        }
        self.len -= 1;
        if hashes.is_empty() {
            level2.remove(bucket2);
        }
        if level2.is_empty() {
            self.buckets.remove(bucket1);
        }
        true
    }

    /// Number of hashes in the index.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of non-empty `bucket1` directories.
    pub fn top_level_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate `(bucket1, bucket2, hash)` in bucket then hash order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.buckets.iter().flat_map(|(bucket1, level2)| {
            level2.iter().flat_map(move |(bucket2, hashes)| {
                hashes
                    .iter()
                    .map(move |hash| (bucket1.as_str(), bucket2.as_str(), hash.as_str()))
            })
        })
    }

    /// Consume the index into its remaining entries.
    pub fn into_entries(self) -> Vec<DirectoryEntry> {
        let mut entries = Vec::with_capacity(self.len);
        for (bucket1, level2) in self.buckets {
            for (bucket2, hashes) in level2 {
                for hash in hashes {
                    entries.push(DirectoryEntry {
                        bucket1: bucket1.clone(),
                        bucket2: bucket2.clone(),
                        hash,
                    });
                }
            }
        }
        entries
    }
}
