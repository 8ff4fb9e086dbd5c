use crate::cleaner::{Cleaner, ScanEntry, ScanResult};
use crate::utils;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories to skip during the large file scan. Caches and trash have
/// their own categories; tool and VCS state is never a deletion candidate.
const SKIP_DIRS: &[&str] = &[
    ".git",
    ".cache",
    ".cargo",
    ".rustup",
    "node_modules",
    "Trash",
];

/// Kernel and runtime pseudo-filesystems, skipped when scanning from /.
const PSEUDO_ROOTS: &[&str] = &["/proc", "/sys", "/dev", "/run"];

pub struct LargeFiles {
    min_bytes: u64,
    root: PathBuf,
}

impl LargeFiles {
    pub fn new(min_bytes: u64, path: Option<&str>) -> Self {
        let root = path.map(PathBuf::from).unwrap_or_else(utils::home_dir);
        Self { min_bytes, root }
    }
}

fn should_skip(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    SKIP_DIRS.iter().any(|&skip| name == skip)
        || PSEUDO_ROOTS.iter().any(|&root| entry.path() == Path::new(root))
}

impl Cleaner for LargeFiles {
    fn name(&self) -> &'static str {
        "large-files"
    }

    fn label(&self) -> &'static str {
        "Large Files"
    }

    fn scan(&self) -> ScanResult {
        let mut entries = Vec::new();
        let mut total_bytes = 0u64;
        let mut errors = Vec::new();

        if !self.root.exists() {
            errors.push(format!("Path does not exist: {}", self.root.display()));
            return ScanResult {
                entries,
                total_bytes,
                errors,
            };
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !should_skip(e));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(metadata) = entry.metadata() {
                if metadata.len() >= self.min_bytes {
                    total_bytes += metadata.len();
                    entries.push(ScanEntry {
                        path: entry.path().to_path_buf(),
                        size_bytes: metadata.len(),
                    });
                }
            }
        }

        // Biggest files first
        entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));

        ScanResult {
            entries,
            total_bytes,
            errors,
        }
    }

    fn clean(&self, _dry_run: bool) -> ScanResult {
        // Never deleted wholesale; the clean command routes these entries
        // through the interactive menu instead.
        self.scan()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_finds_files_over_threshold() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("big.iso"), vec![0u8; 4096]).unwrap();
        fs::write(dir.path().join("small.txt"), vec![0u8; 16]).unwrap();

        let cleaner = LargeFiles::new(1024, Some(dir.path().to_str().unwrap()));
        let result = cleaner.scan();

        assert_eq!(1, result.entries.len());
        assert_eq!(4096, result.total_bytes);
        assert!(result.entries[0].path.ends_with("big.iso"));
    }

    #[test]
    fn test_scan_skips_excluded_directories() {
        let dir = tempfile::tempdir().unwrap();
        let git = dir.path().join(".git");
        fs::create_dir(&git).unwrap();
        fs::write(git.join("pack.bin"), vec![0u8; 4096]).unwrap();

        let cleaner = LargeFiles::new(1024, Some(dir.path().to_str().unwrap()));
        assert!(cleaner.scan().entries.is_empty());
    }

    #[test]
    fn test_scan_sorts_by_size_descending() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("medium"), vec![0u8; 2048]).unwrap();
        fs::write(dir.path().join("huge"), vec![0u8; 8192]).unwrap();

        let cleaner = LargeFiles::new(1024, Some(dir.path().to_str().unwrap()));
        let result = cleaner.scan();

        assert_eq!(2, result.entries.len());
        assert!(result.entries[0].path.ends_with("huge"));
        assert_eq!(10240, result.total_bytes);
    }

    #[test]
    fn test_missing_root_reports_error() {
        let cleaner = LargeFiles::new(1024, Some("/no/such/tidydeb/path"));
        let result = cleaner.scan();
        assert_eq!(1, result.errors.len());
        assert!(result.entries.is_empty());
    }
}
