use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// List the entries of a diary folder, without recursion.
///
/// Every regular file is treated as a diary file regardless of extension.
/// Sub-directories are skipped. Order follows the directory listing and is
/// not meaningful.
pub fn list_diary_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error reading directory {}: {}", dir.display(), err),
        )
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Error reading entry in directory {}: {}", dir.display(), err),
            )
        })?;

        let path = entry.path();
        if path.is_dir() {
            debug!("Skipping sub-directory {}", path.display());
            continue;
        }
        files.push(path);
    }

    Ok(files)
}
