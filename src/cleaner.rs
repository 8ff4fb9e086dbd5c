use crate::executor;
use std::path::PathBuf;

/// One item found during a scan.
pub struct ScanEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Result of scanning a single category.
pub struct ScanResult {
    pub entries: Vec<ScanEntry>,
    pub total_bytes: u64,
    pub errors: Vec<String>,
}

/// The trait every cleaner module implements.
pub trait Cleaner {
    /// Machine-readable name used in --category flag (e.g. "apt-cache").
    fn name(&self) -> &'static str;

    /// Human-readable label for display (e.g. "APT Package Cache").
    fn label(&self) -> &'static str;

    /// Scan and return what would be cleaned. Never deletes anything.
    fn scan(&self) -> ScanResult;

    /// Actually delete the entries when dry_run is false.
    /// When dry_run is true, behaves like scan().
    fn clean(&self, dry_run: bool) -> ScanResult;
}

/// Delete every entry of a scan result. Entries that went away are kept,
/// entries that could not be removed turn into error strings; one failed
/// removal never stops the rest of the batch. total_bytes ends up holding
/// what was actually freed.
pub fn delete_entries(mut result: ScanResult) -> ScanResult {
    let mut removed = Vec::new();
    let mut total_freed = 0u64;

    for entry in result.entries.drain(..) {
        match executor::remove_path(&entry.path) {
            Ok(freed) => {
                total_freed += freed;
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
