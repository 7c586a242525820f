//! Reconciliation of export and listing files on disk

use moodle_tools::error::ToolError;
use moodle_tools::reconcile::{reconcile_files, DirectoryIndex, Reconciler};
use tempfile::TempDir;

use crate::integration::write_lines;

#[test]
fn test_matching_inputs_are_clean() {
    let temp_dir = TempDir::new().unwrap();
    let dir_file = write_lines(
        temp_dir.path(),
        "dir.txt",
        &["ab/cd/abcd11", "ab/ce/abce22", "f0/0d/f00d33"],
    );
    let db_file = write_lines(
        temp_dir.path(),
        "db.txt",
        &[
            "abcd11;/1/mod_resource/content/0;a.pdf;10",
            "f00d33;/2/user/draft/5;b.png;20",
            "abce22;/3/course/overview/0;c.txt;30",
        ],
    );

    let report = reconcile_files(&db_file, &dir_file).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.stats.matched, 3);
    assert_eq!(report.stats.directory_entries, 3);
}

#[test]
fn test_both_sections_are_reported() {
    let temp_dir = TempDir::new().unwrap();
    let dir_file = write_lines(
        temp_dir.path(),
        "dir.txt",
        &["ab/cd/abcd11", "99/88/998877", "12/34/123456"],
    );
    let db_file = write_lines(
        temp_dir.path(),
        "db.txt",
        &[
            "abcd11;/1/x;a.pdf;10",
            "deadbe;/2/y;gone.docx;20",
            "malformed line",
            "deadbe;/2/y;gone.docx;20",
        ],
    );

    let report = reconcile_files(&db_file, &dir_file).unwrap();
    assert_eq!(
        report.missing_from_directory_lines(true),
        vec!["de/ad/deadbe -: gone.docx", "de/ad/deadbe -: gone.docx"]
    );
    assert_eq!(
        report.missing_from_db_lines(),
        vec!["12/34/123456", "99/88/998877"]
    );
    assert_eq!(report.stats.db_rows, 4);
    assert_eq!(report.stats.db_rows_skipped, 1);
}

#[test]
fn test_crlf_and_invalid_utf8_are_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    let dir_file = temp_dir.path().join("dir.txt");
    std::fs::write(&dir_file, b"ab/cd/abcd11\r\n").unwrap();
    let db_file = temp_dir.path().join("db.txt");
    std::fs::write(&db_file, b"abcd11;/1/x;caf\xe9.txt;10\r\n").unwrap();

    let report = reconcile_files(&db_file, &dir_file).unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_missing_listing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_file = write_lines(temp_dir.path(), "db.txt", &["abcd11;/1/x;a.pdf;10"]);
    let err = reconcile_files(&db_file, &temp_dir.path().join("absent.txt")).unwrap_err();
    match err {
        ToolError::Io { path, .. } => assert!(path.ends_with("absent.txt")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_streaming_matches_file_scan() {
    let temp_dir = TempDir::new().unwrap();
    let dir_file = write_lines(temp_dir.path(), "dir.txt", &["ab/cd/abcd11", "ee/ff/eeff22"]);
    let db_file = write_lines(temp_dir.path(), "db.txt", &["eeff22;/p;n;1", "010203;/q;m;2"]);

    let mut reconciler = Reconciler::new(DirectoryIndex::load(&dir_file).unwrap());
    reconciler.process_file(&db_file).unwrap();
    assert!(reconciler.processed().contains("eeff22"));
    assert_eq!(reconciler.remaining().len(), 1);

    let streamed = reconciler.finish();
    let from_files = reconcile_files(&db_file, &dir_file).unwrap();
    assert_eq!(streamed.missing_from_db, from_files.missing_from_db);
    assert_eq!(
        streamed.missing_from_directory,
        from_files.missing_from_directory
    );
}
