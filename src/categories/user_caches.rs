use crate::cleaner::{self, Cleaner, ScanEntry, ScanResult};
use crate::utils;
use std::path::PathBuf;

/// Per-user application caches under ~/.cache. Thumbnails live there too
/// but have their own category, so they are left out here.
pub struct UserCaches;

fn cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| utils::home_dir().join(".cache"))
}

impl Cleaner for UserCaches {
    fn name(&self) -> &'static str {
        "user-caches"
    }

    fn label(&self) -> &'static str {
        "User Caches"
    }

    fn scan(&self) -> ScanResult {
        let cache_dir = cache_dir();
        let mut entries = Vec::new();
        let mut total_bytes = 0u64;
        let mut errors = Vec::new();

        if !cache_dir.exists() {
            return ScanResult {
                entries,
                total_bytes,
                errors,
            };
        }

        match std::fs::read_dir(&cache_dir) {
            Ok(read_dir) => {
                for entry in read_dir.flatten() {
                    if entry.file_name().to_string_lossy() == "thumbnails" {
                        continue;
                    }
                    let path = entry.path();
                    let size = utils::entry_size(&path);
                    if size > 0 {
                        total_bytes += size;
                        entries.push(ScanEntry {
                            path,
                            size_bytes: size,
                        });
                    }
                }
            }
            Err(e) => {
                errors.push(format!("Cannot read {}: {e}", cache_dir.display()));
            }
        }

        entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

        ScanResult {
            entries,
            total_bytes,
            errors,
        }
    }

    fn clean(&self, dry_run: bool) -> ScanResult {
        let result = self.scan();
        if dry_run {
            return result;
        }
        cleaner::delete_entries(result)
    }
}
