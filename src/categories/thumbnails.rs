use crate::cleaner::{self, Cleaner, ScanEntry, ScanResult};
use crate::utils;

/// Thumbnail caches under ~/.cache/thumbnails (normal, large, fail...).
/// Regenerated on demand by file managers.
pub struct Thumbnails;

impl Cleaner for Thumbnails {
    fn name(&self) -> &'static str {
        "thumbnails"
    }

    fn label(&self) -> &'static str {
        "Thumbnail Cache"
    }

    fn scan(&self) -> ScanResult {
        let thumb_dir = dirs::cache_dir()
            .unwrap_or_else(|| utils::home_dir().join(".cache"))
            .join("thumbnails");
        let mut entries = Vec::new();
        let mut total_bytes = 0u64;
        let mut errors = Vec::new();

        if !thumb_dir.exists() {
            return ScanResult {
                entries,
                total_bytes,
                errors,
            };
        }

        match std::fs::read_dir(&thumb_dir) {
            Ok(read_dir) => {
                for entry in read_dir.flatten() {
                    let path = entry.path();
                    let size = utils::entry_size(&path);
                    total_bytes += size;
                    entries.push(ScanEntry {
                        path,
                        size_bytes: size,
                    });
                }
            }
            Err(e) => {
                errors.push(format!("Cannot read {}: {e}", thumb_dir.display()));
            }
        }

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
