use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to `harness.toml` in a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("harness.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}
