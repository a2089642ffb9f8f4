use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand a backup-tree path into the concrete files it denotes.
///
/// A regular file yields itself; a directory yields every regular file at
/// any depth beneath it, sorted by file name so the order is stable within a
/// run. A missing path yields nothing - a rule whose backup data was never
/// captured is skipped here, not treated as an error.
pub fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to walk backup tree at {}", path.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
