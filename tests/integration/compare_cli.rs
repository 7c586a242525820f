//! End-to-end runs of the `moodledata-compare` binary

use std::process::{Command, Output};
use tempfile::TempDir;

use crate::integration::write_lines;

fn run_compare(temp_dir: &TempDir, args: &[&str]) -> Output {
    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_moodledata-compare"))
        .env("XDG_CONFIG_HOME", &config_home)
        .env_remove("MOODLE_TOOLS_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn inputs(temp_dir: &TempDir) -> (String, String) {
    let dir_file = write_lines(temp_dir.path(), "dir.txt", &["ab/cd/abcd11", "ee/ff/eeff22"]);
    let db_file = write_lines(
        temp_dir.path(),
        "db.txt",
        &["abcd11;/1/x;kept.txt;1", "010203;/2/y;lost.pdf;2"],
    );
    (
        db_file.to_string_lossy().into_owned(),
        dir_file.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_text_report() {
    let temp_dir = TempDir::new().unwrap();
    let (db, dir) = inputs(&temp_dir);
    let output = run_compare(&temp_dir, &["-d", &db, "-f", &dir]);

    assert!(
        output.status.success(),
        "compare should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "\nFiles in DB but not in moodle-data\n01/02/010203 -: lost.pdf\n\n\
         Files in moodle-data but not in DB\nee/ff/eeff22\n"
    );
}

#[test]
fn test_noname_report() {
    let temp_dir = TempDir::new().unwrap();
    let (db, dir) = inputs(&temp_dir);
    let output = run_compare(&temp_dir, &["--dbfile", &db, "--dirfile", &dir, "--noname"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\n01/02/010203\n"));
    assert!(!stdout.contains("lost.pdf"));
}

#[test]
fn test_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let (db, dir) = inputs(&temp_dir);
    let output = run_compare(&temp_dir, &["-d", &db, "-f", &dir, "--format", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["missing_from_directory"][0]["hash"], "010203");
    assert_eq!(value["missing_from_directory"][0]["path"], "/2/y");
    assert_eq!(value["missing_from_db"][0]["bucket1"], "ee");
    assert_eq!(value["stats"]["db_rows"], 2);
}

#[test]
fn test_missing_argument_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let (db, _) = inputs(&temp_dir);
    let output = run_compare(&temp_dir, &["-d", &db]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no report on failure");
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be provided"));
}

#[test]
fn test_unreadable_input_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let (_, dir) = inputs(&temp_dir);
    let absent = temp_dir.path().join("absent.txt");
    let output = run_compare(&temp_dir, &["-d", absent.to_str().unwrap(), "-f", &dir]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.txt"));
}
