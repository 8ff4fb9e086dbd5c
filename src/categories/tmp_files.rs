use crate::cleaner::{self, Cleaner, ScanEntry, ScanResult};
use crate::utils;
use std::path::Path;
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

const TMP_DIRS: &[&str] = &["/tmp", "/var/tmp"];

/// Minimum age: 7 days.
const MIN_AGE_DAYS: u64 = 7;

/// systemd service sandboxes; not ours to touch.
const SKIP_PREFIX: &str = "systemd-private-";

/// The newest modification time anywhere under a path. A directory only
/// counts as old if nothing inside it is recent.
fn newest_mtime(path: &Path) -> SystemTime {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.metadata().ok())
        .filter_map(|m| m.modified().ok())
        .max()
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

pub struct TmpFiles;

impl Cleaner for TmpFiles {
    fn name(&self) -> &'static str {
        "tmp-files"
    }

    fn label(&self) -> &'static str {
        "Temporary Files"
    }

    fn scan(&self) -> ScanResult {
        let mut entries = Vec::new();
        let mut total_bytes = 0u64;
        let mut errors = Vec::new();

        let threshold = SystemTime::now()
            .checked_sub(Duration::from_secs(MIN_AGE_DAYS * 86400))
            .unwrap_or(SystemTime::UNIX_EPOCH);

        for dir in TMP_DIRS {
            let dir = Path::new(dir);
            if !dir.exists() {
                continue;
            }

            match std::fs::read_dir(dir) {
                Ok(read_dir) => {
                    for entry in read_dir.flatten() {
                        let path = entry.path();
                        let name = entry.file_name().to_string_lossy().to_string();
                        if name.starts_with(SKIP_PREFIX) {
                            continue;
                        }
                        if newest_mtime(&path) > threshold {
                            continue;
                        }

                        let size = utils::entry_size(&path);
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

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_newest_mtime_sees_into_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("build");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("fresh"), b"x").unwrap();

        let age = SystemTime::now()
            .duration_since(newest_mtime(dir.path()))
            .unwrap();
        assert!(age < Duration::from_secs(60));
    }
}
