use crate::cleaner::{Cleaner, ScanEntry, ScanResult};
use crate::cmd;
use crate::utils;
use std::path::PathBuf;
use std::process::Command;

/// Packages apt would autoremove: installed as dependencies, no longer
/// needed by anything. Sizes come from apt's own estimate, so entries carry
/// the package name with no per-package size.
pub struct AptOrphans;

fn simulate_autoremove() -> anyhow::Result<Vec<String>> {
    let mut cmd = Command::new("apt-get");
    cmd.arg("-s").arg("autoremove");
    cmd::output_as_lines(cmd)
}

/// "Remv libfoo1 [1.2-3]" lines from a simulated run.
fn removable_packages(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| line.strip_prefix("Remv "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(String::from)
        .collect()
}

/// "After this operation, 58.3 MB disk space will be freed."
fn freed_estimate(lines: &[String]) -> u64 {
    for line in lines {
        if let Some(rest) = line.trim().strip_prefix("After this operation, ") {
            if let Some(size_str) = rest.split(" disk space will be freed").next() {
                if let Ok(bytes) = utils::parse_size(size_str) {
                    return bytes;
                }
            }
        }
    }
    0
}

impl Cleaner for AptOrphans {
    fn name(&self) -> &'static str {
        "apt-orphans"
    }

    fn label(&self) -> &'static str {
        "Orphaned Packages"
    }

    fn scan(&self) -> ScanResult {
        let lines = match simulate_autoremove() {
            Ok(lines) => lines,
            Err(e) => {
                return ScanResult {
                    entries: Vec::new(),
                    total_bytes: 0,
                    errors: vec![format!("Cannot query apt: {e}")],
                };
            }
        };

        let entries: Vec<ScanEntry> = removable_packages(&lines)
            .into_iter()
            .map(|pkg| ScanEntry {
                path: PathBuf::from(pkg),
                size_bytes: 0,
            })
            .collect();

        ScanResult {
            total_bytes: freed_estimate(&lines),
            entries,
            errors: Vec::new(),
        }
    }

    fn clean(&self, dry_run: bool) -> ScanResult {
        let mut result = self.scan();
        if dry_run || result.entries.is_empty() {
            return result;
        }

        let mut cmd = Command::new("apt-get");
        cmd.arg("-y").arg("autoremove");
        if let Err(e) = cmd::run_checked(cmd) {
            result.errors.push(format!("autoremove failed: {e}"));
            result.total_bytes = 0;
        }

        result
    }
}
