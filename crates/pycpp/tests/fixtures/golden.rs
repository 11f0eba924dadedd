//! Golden file comparison utilities.

use std::fs;
use std::path::{Path, PathBuf};

pub fn golden_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/golden")
        .join(name)
}

/// Load a golden file for comparison.
pub fn load_golden(name: &str) -> String {
    let path = golden_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load golden file {}: {e}", path.display()))
}

/// Compare output against golden file, updating if UPDATE_GOLDEN=1.
pub fn assert_golden(name: &str, actual: &str) {
    let path = golden_path(name);

    if std::env::var("UPDATE_GOLDEN").is_ok() {
        fs::write(&path, actual).expect("Failed to update golden file");
        return;
    }

    let expected = load_golden(name);
    if actual != expected {
        eprintln!("Golden file mismatch: {}", name);
        eprintln!("Expected:");
        for line in expected.lines() {
            eprintln!("  {}", line);
        }
        eprintln!("Actual:");
        for line in actual.lines() {
            eprintln!("  {}", line);
        }
        panic!("Golden file mismatch");
    }
}
