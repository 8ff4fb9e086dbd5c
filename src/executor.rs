use crate::utils;
use std::io;
use std::path::Path;

/// Remove a file or directory tree. Returns bytes freed on success.
/// A target that is already gone counts as zero bytes freed, not an error,
/// so repeating a deletion is always safe.
pub fn remove_path(path: &Path) -> io::Result<u64> {
    let size = utils::entry_size(path);

    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(size),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e),
    }
}
