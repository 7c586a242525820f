//! Property-based tests for index construction and reconciliation

use moodle_tools::reconcile::{build_directory_index, hash_buckets, reconcile};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn hash_strategy() -> impl Strategy<Value = String> {
    "[0-9a-f]{6,12}"
}

fn listing_line(hash: &str) -> String {
    let (b1, b2) = hash_buckets(hash);
    format!("{}/{}/{}", b1, b2, hash)
}

fn export_line(hash: &str) -> String {
    format!("{};/1/component/area/0;{}.bin;42", hash, hash)
}

proptest! {
    /// Building the index twice from the same lines gives the same index.
    #[test]
    fn test_index_construction_is_deterministic(
        hashes in prop::collection::vec(hash_strategy(), 0..40)
    ) {
        let lines: Vec<String> = hashes.iter().map(|h| listing_line(h)).collect();
        let first = build_directory_index(&lines);
        let second = build_directory_index(&lines);
        prop_assert_eq!(first.len(), second.len());
        prop_assert_eq!(first.into_entries(), second.into_entries());
    }

    /// Duplicate listing lines collapse into one entry.
    #[test]
    fn test_index_size_counts_distinct_hashes(
        hashes in prop::collection::vec(hash_strategy(), 0..40)
    ) {
        let mut lines: Vec<String> = hashes.iter().map(|h| listing_line(h)).collect();
        lines.extend(hashes.iter().map(|h| listing_line(h)));
        let distinct: BTreeSet<&String> = hashes.iter().collect();
        prop_assert_eq!(build_directory_index(&lines).len(), distinct.len());
    }

    /// With the same hash set on both sides nothing is reported.
    #[test]
    fn test_identical_sets_reconcile_clean(
        hashes in prop::collection::btree_set(hash_strategy(), 0..40)
    ) {
        let listing: Vec<String> = hashes.iter().map(|h| listing_line(h)).collect();
        let export: Vec<String> = hashes.iter().rev().map(|h| export_line(h)).collect();
        let (missing_dir, missing_db) =
            reconcile(&export, build_directory_index(&listing), true);
        prop_assert!(missing_dir.is_empty());
        prop_assert!(missing_db.is_empty());
    }

    /// Every listed hash ends up matched or in the "missing from db" section,
    /// and every distinct unmatched export hash is reported.
    #[test]
    fn test_reconciliation_partitions_hashes(
        listed in prop::collection::btree_set(hash_strategy(), 0..30),
        exported in prop::collection::btree_set(hash_strategy(), 0..30),
    ) {
        let listing: Vec<String> = listed.iter().map(|h| listing_line(h)).collect();
        let export: Vec<String> = exported.iter().map(|h| export_line(h)).collect();
        let (missing_dir, missing_db) =
            reconcile(&export, build_directory_index(&listing), false);

        let expected_dir: BTreeSet<String> =
            exported.difference(&listed).map(|h| listing_line(h)).collect();
        let expected_db: BTreeSet<String> =
            listed.difference(&exported).map(|h| listing_line(h)).collect();

        prop_assert_eq!(missing_dir.iter().cloned().collect::<BTreeSet<_>>(), expected_dir);
        prop_assert_eq!(missing_dir.len(), exported.difference(&listed).count());
        prop_assert_eq!(missing_db.iter().cloned().collect::<BTreeSet<_>>(), expected_db);
    }
}
