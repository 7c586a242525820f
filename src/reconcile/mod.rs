//! Moodledata Reconciliation
//!
//! Compares a database export of content-addressed file records with a
//! listing of the `filedir` tree of a moodledata directory. Files are matched
//! by content hash; the result lists the records missing on either side.

pub mod entry;
pub mod index;
pub mod lines;
pub mod reconciler;

pub use entry::{hash_buckets, DatabaseEntry, DirectoryEntry};
pub use index::DirectoryIndex;
pub use reconciler::{
    reconcile, reconcile_files, MissingFromDatabase, MissingFromDirectory, ProcessedSet,
    ReconcileReport, ReconcileStats, Reconciler,
};

/// Build the directory index from listing lines.
pub fn build_directory_index<I, S>(lines: I) -> DirectoryIndex
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DirectoryIndex::from_lines(lines)
}
