//! Schema document discovery.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extension of schema documents.
pub const SCHEMA_EXTENSION: &str = "json";

/// Recursively collects every `*.json` file under `dir`, sorted by path.
///
/// # Errors
/// Returns an error if `dir` or one of its entries cannot be read.
pub fn discover_schemas(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION)
        {
            debug!(path = %path.display(), "found schema document");
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
