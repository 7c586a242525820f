//! Shared test utilities for integration tests

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that change `XDG_CONFIG_HOME` or `HOME`.
static CONFIG_ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Write `lines` to `dir/name`, one per line, and return the path.
pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    if !lines.is_empty() {
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Run `test_fn` with `XDG_CONFIG_HOME` pointing at a fresh temp directory.
pub fn with_config_home<F, R>(test_fn: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());

    let result = test_fn(temp_dir.path());

    match original {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    result
}
