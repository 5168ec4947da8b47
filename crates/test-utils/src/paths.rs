//! Locating real radar files and scratch directories for tests.

use std::path::{Path, PathBuf};

/// Environment variable naming an extra directory of radar files.
pub const TEST_DATA_ENV: &str = "WSR88D_TEST_DATA";

pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Looks for `name` under `$WSR88D_TEST_DATA`, then
/// `crates/wsr88d-parser/testdata/`, then `testdata/` at the workspace root.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let root = workspace_root();
    std::env::var_os(TEST_DATA_ENV)
        .map(|dir| PathBuf::from(dir).join(name))
        .into_iter()
        .chain([
            root.join("crates/wsr88d-parser/testdata").join(name),
            root.join("testdata").join(name),
        ])
        .find(|path| path.is_file())
}

/// Scratch directory, removed when dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("wsr88d_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Writes `data` to `dir/name` for loaders that take a path.
pub fn write_test_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("Failed to write test file");
    path
}
