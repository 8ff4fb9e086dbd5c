use crate::cleaner::{Cleaner, ScanEntry, ScanResult};
use crate::cmd;
use crate::utils;
use std::path::PathBuf;
use std::process::Command;

const JOURNAL_DIR: &str = "/var/log/journal";

/// Archived systemd journals beyond the retention window. journalctl does
/// the measuring and the vacuuming; this cleaner parses its figures.
pub struct Journal {
    retention: String,
}

impl Journal {
    pub fn new(retention: &str) -> Self {
        Journal {
            retention: retention.to_string(),
        }
    }
}

/// "Archived and active journals take up 1.5G in the file system."
fn parse_disk_usage(lines: &[String]) -> u64 {
    for line in lines {
        if let Some(rest) = line.split("take up ").nth(1) {
            if let Some(size_str) = rest.split_whitespace().next() {
                if let Ok(bytes) = utils::parse_size(size_str.trim_end_matches('.')) {
                    return bytes;
                }
            }
        }
    }
    0
}

/// "Vacuuming done, freed 496.0M of archived journals from /var/log/journal/abc."
/// One line per journal directory; they sum.
fn parse_freed(lines: &[String]) -> u64 {
    lines
        .iter()
        .filter_map(|line| line.split("freed ").nth(1))
        .filter_map(|rest| rest.split_whitespace().next())
        .filter_map(|token| utils::parse_size(token).ok())
        .sum()
}

impl Cleaner for Journal {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn label(&self) -> &'static str {
        "Systemd Journal"
    }

    fn scan(&self) -> ScanResult {
        let mut cmd = Command::new("journalctl");
        cmd.arg("--disk-usage");

        let lines = match cmd::output_as_lines(cmd) {
            Ok(lines) => lines,
            Err(e) => {
                return ScanResult {
                    entries: Vec::new(),
                    total_bytes: 0,
                    errors: vec![format!("Cannot query journalctl: {e}")],
                };
            }
        };

        let total_bytes = parse_disk_usage(&lines);
        let entries = if total_bytes > 0 {
            vec![ScanEntry {
                path: PathBuf::from(JOURNAL_DIR),
                size_bytes: total_bytes,
            }]
        } else {
            Vec::new()
        };

        ScanResult {
            entries,
            total_bytes,
            errors: Vec::new(),
        }
    }

    fn clean(&self, dry_run: bool) -> ScanResult {
        let mut result = self.scan();
        if dry_run {
            return result;
        }

        let mut cmd = Command::new("journalctl");
        cmd.arg(format!("--vacuum-time={}", self.retention));

        // journalctl reports what it vacuumed on stderr.
        match cmd::all_output_lines(cmd) {
            Ok(lines) => {
                result.total_bytes = parse_freed(&lines);
            }
            Err(e) => {
                result.errors.push(format!("vacuum failed: {e}"));
                result.total_bytes = 0;
            }
        }

        result
    }
}
