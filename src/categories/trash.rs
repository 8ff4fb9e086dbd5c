use crate::cleaner::{Cleaner, ScanEntry, ScanResult};
use crate::executor;
use crate::utils;
use std::path::{Path, PathBuf};

/// XDG trash: deleted items live in Trash/files, each with a matching
/// Trash/info/<name>.trashinfo record. Both go when an item is purged.
pub struct Trash;

fn trash_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| utils::home_dir().join(".local/share"))
        .join("Trash")
}

fn info_record(trash: &Path, item: &Path) -> Option<PathBuf> {
    let name = item.file_name()?;
    let mut info_name = name.to_os_string();
    info_name.push(".trashinfo");
    Some(trash.join("info").join(info_name))
}

impl Cleaner for Trash {
    fn name(&self) -> &'static str {
        "trash"
    }

    fn label(&self) -> &'static str {
        "Trash"
    }

    fn scan(&self) -> ScanResult {
        let trash = trash_dir();
        let files_dir = trash.join("files");
        let mut entries = Vec::new();
        let mut total_bytes = 0u64;
        let mut errors = Vec::new();

        if !files_dir.exists() {
            return ScanResult {
                entries,
                total_bytes,
                errors,
            };
        }

        match std::fs::read_dir(&files_dir) {
            Ok(read_dir) => {
                for entry in read_dir.flatten() {
                    let path = entry.path();
                    let mut size = utils::entry_size(&path);
                    if let Some(info) = info_record(&trash, &path) {
                        size += utils::entry_size(&info);
                    }
                    total_bytes += size;
                    entries.push(ScanEntry {
                        path,
                        size_bytes: size,
                    });
                }
            }
            Err(e) => {
                errors.push(format!("Cannot read {}: {e}", files_dir.display()));
            }
        }

        ScanResult {
            entries,
            total_bytes,
            errors,
        }
    }

    fn clean(&self, dry_run: bool) -> ScanResult {
        let mut result = self.scan();
        if dry_run {
            return result;
        }

        let trash = trash_dir();
        let mut removed = Vec::new();
        let mut total_freed = 0u64;

        for entry in result.entries.drain(..) {
            match executor::remove_path(&entry.path) {
                Ok(freed) => {
                    total_freed += freed;
                    if let Some(info) = info_record(&trash, &entry.path) {
                        total_freed += executor::remove_path(&info).unwrap_or(0);
                    }
                    removed.push(entry);
                }
                Err(e) => {
                    result
                        .errors
                        .push(format!("Failed to remove {}: {e}", entry.path.display()));
                }
            }
        }

        result.entries = removed;
        result.total_bytes = total_freed;
        result
    }
}
