//! Database export scan against the directory index.

use crate::error::ToolError;
use crate::reconcile::entry::{DatabaseEntry, DirectoryEntry};
use crate::reconcile::index::DirectoryIndex;
use crate::reconcile::lines::FileLines;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Marker placed between the storage path and the file name in text reports.
pub const NAME_MARKER: &str = " -: ";

/// Hashes already matched against the directory index.
///
/// Only successful matches are recorded. A hash that was never found is
/// looked up again (and reported again) for every row that repeats it.
#[derive(Debug, Default)]
pub struct ProcessedSet {
    hashes: HashSet<String>,
}

impl ProcessedSet {
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Record a matched hash; returns false if it was already recorded.
    pub fn mark(&mut self, hash: String) -> bool {
        self.hashes.insert(hash)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// A database row whose file is not in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingFromDirectory {
    pub bucket1: String,
    pub bucket2: String,
    pub hash: String,
    pub path: String,
    pub name: String,
    pub size: String,
}

impl MissingFromDirectory {
    fn from_entry(entry: DatabaseEntry, bucket1: String, bucket2: String) -> Self {
        Self {
            bucket1,
            bucket2,
            hash: entry.hash,
            path: entry.path,
            name: entry.name,
            size: entry.size,
        }
    }

    /// `bucket1/bucket2/hash`, followed by ` -: <name>` when `show_name` is set.
    pub fn line(&self, show_name: bool) -> String {
        let mut line = format!("{}/{}/{}", self.bucket1, self.bucket2, self.hash);
        if show_name {
            line.push_str(NAME_MARKER);
            line.push_str(&self.name);
        }
        line
    }
}

/// A listed file with no database row.
pub type MissingFromDatabase = DirectoryEntry;

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    /// Listed files at the start of the scan.
    pub directory_entries: usize,
    /// Export lines read, including malformed ones.
    pub db_rows: usize,
    /// Export lines dropped for having fewer than four fields.
    pub db_rows_skipped: usize,
    /// Rows skipped because their hash was already matched.
    pub duplicate_rows: usize,
    /// Distinct hashes found on both sides.
    pub matched: usize,
}

/// Result of a full reconciliation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// Rows of the export without a listed file, in export order.
    pub missing_from_directory: Vec<MissingFromDirectory>,
    /// Listed files without an export row, in bucket order.
    pub missing_from_db: Vec<MissingFromDatabase>,
    pub stats: ReconcileStats,
}

impl ReconcileReport {
    pub fn missing_from_directory_lines(&self, show_name: bool) -> Vec<String> {
        self.missing_from_directory
            .iter()
            .map(|m| m.line(show_name))
            .collect()
    }

    pub fn missing_from_db_lines(&self) -> Vec<String> {
        self.missing_from_db.iter().map(|e| e.to_string()).collect()
    }

    /// True when both sides matched completely.
    pub fn is_clean(&self) -> bool {
        self.missing_from_directory.is_empty() && self.missing_from_db.is_empty()
    }
}

/// Owns the directory index for the duration of one export scan.
pub struct Reconciler {
    index: DirectoryIndex,
    processed: ProcessedSet,
    missing_from_directory: Vec<MissingFromDirectory>,
    stats: ReconcileStats,
}

impl Reconciler {
    pub fn new(index: DirectoryIndex) -> Self {
        let stats = ReconcileStats {
            directory_entries: index.len(),
            ..ReconcileStats::default()
        };
        Self {
            index,
            processed: ProcessedSet::default(),
            missing_from_directory: Vec::new(),
            stats,
        }
    }

    /// Process one raw export line.
    pub fn process_line(&mut self, line: &str) {
        self.stats.db_rows += 1;
        match DatabaseEntry::parse(line) {
            Some(entry) => self.process_entry(entry),
            None => self.stats.db_rows_skipped += 1,
        }
    }

    /// Match one export row against the index.
    pub fn process_entry(&mut self, entry: DatabaseEntry) {
        if self.processed.contains(&entry.hash) {
            self.stats.duplicate_rows += 1;
            return;
        }

        let (bucket1, bucket2) = entry.buckets();
        if self.index.remove(&bucket1, &bucket2, &entry.hash) {
            self.processed.mark(entry.hash);
            self.stats.matched += 1;
            return;
        }

        self.missing_from_directory
            .push(MissingFromDirectory::from_entry(entry, bucket1, bucket2));
    }

    /// Process every line of an in-memory export.
    pub fn process_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.process_line(line.as_ref());
        }
    }

    /// Stream an export file through the reconciler.
    pub fn process_file(&mut self, path: &Path) -> Result<(), ToolError> {
        for line in FileLines::open(path)? {
            self.process_line(&line?);
        }
        debug!(
            path = %path.display(),
            rows = self.stats.db_rows,
            skipped = self.stats.db_rows_skipped,
            "Database export scanned"
        );
        Ok(())
    }

    /// Hashes matched so far.
    pub fn processed(&self) -> &ProcessedSet {
        &self.processed
    }

    /// Listed files not matched so far.
    pub fn remaining(&self) -> &DirectoryIndex {
        &self.index
    }

    /// End the scan; the residual index becomes the "missing from db" section.
    pub fn finish(self) -> ReconcileReport {
        let missing_from_db = self.index.into_entries();
        info!(
            directory_entries = self.stats.directory_entries,
            db_rows = self.stats.db_rows,
            matched = self.stats.matched,
            missing_from_directory = self.missing_from_directory.len(),
            missing_from_db = missing_from_db.len(),
            "Reconciliation finished"
        );
        ReconcileReport {
            missing_from_directory: self.missing_from_directory,
            missing_from_db,
            stats: self.stats,
        }
    }
}

/// Reconcile a complete export held in memory against `index`.
///
/// Returns the "missing from directory" and "missing from database" lines.
pub fn reconcile<I, S>(
    db_lines: I,
    index: DirectoryIndex,
    show_name: bool,
) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reconciler = Reconciler::new(index);
    reconciler.process_lines(db_lines);
    let report = reconciler.finish();
    (
        report.missing_from_directory_lines(show_name),
        report.missing_from_db_lines(),
    )
}

/// Load both files and reconcile them. Nothing is reported unless both
/// inputs are read completely.
pub fn reconcile_files(db_file: &Path, dir_file: &Path) -> Result<ReconcileReport, ToolError> {
    let index = DirectoryIndex::load(dir_file)?;
    let mut reconciler = Reconciler::new(index);
    reconciler.process_file(db_file)?;
    Ok(reconciler.finish())
}
