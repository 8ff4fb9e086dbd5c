use crate::cleaner::{self, Cleaner, ScanEntry, ScanResult};
use std::path::Path;

/// Downloaded .deb archives kept after installation.
const ARCHIVE_DIRS: &[&str] = &[
    "/var/cache/apt/archives",
    "/var/cache/apt/archives/partial",
];

pub struct AptCache;

impl Cleaner for AptCache {
    fn name(&self) -> &'static str {
        "apt-cache"
    }

    fn label(&self) -> &'static str {
        "APT Package Cache"
    }

    fn scan(&self) -> ScanResult {
        let mut entries = Vec::new();
        let mut total_bytes = 0u64;
        let mut errors = Vec::new();

        for dir in ARCHIVE_DIRS {
            let dir = Path::new(dir);
            if !dir.exists() {
                continue;
            }

            match std::fs::read_dir(dir) {
                Ok(read_dir) => {
                    for entry in read_dir.flatten() {
                        let path = entry.path();
                        if path.extension().and_then(|ext| ext.to_str()) != Some("deb") {
                            continue;
                        }
                        let size = path.metadata().map(|m| m.len()).unwrap_or(0);
                        total_bytes += size;
                        entries.push(ScanEntry {
                            path,
                            size_bytes: size,
                        });
                    }
                }
                Err(e) => {
                    errors.push(format!("Cannot read {}: {e}", dir.display()));
                }
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
