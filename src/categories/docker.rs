use crate::cleaner::{Cleaner, ScanEntry, ScanResult};
use crate::cmd;
use crate::utils;
use std::path::PathBuf;
use std::process::Command;

/// Reclaimable container engine storage: dangling images, stopped
/// containers, build cache. Measured and pruned through the docker CLI.
pub struct DockerResources;

fn system_df() -> anyhow::Result<Vec<String>> {
    let mut cmd = Command::new("docker");
    cmd.arg("system")
        .arg("df")
        .arg("--format")
        .arg("{{.Type}}\t{{.Size}}\t{{.Reclaimable}}");
    cmd::output_as_lines(cmd)
}

/// "Images\t1.84GB\t1.204GB (65%)" lines from `docker system df`.
fn reclaimable_by_type(lines: &[String]) -> Vec<(String, u64)> {
    lines
        .iter()
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let kind = parts.next()?;
            let _total = parts.next()?;
            let reclaimable = parts.next()?;
            let token = reclaimable.split_whitespace().next()?;
            let bytes = utils::parse_size(token).ok()?;
            Some((kind.to_string(), bytes))
        })
        .collect()
}

/// "Total reclaimed space: 1.084GB" printed by `docker system prune`.
fn reclaimed_total(lines: &[String]) -> u64 {
    lines
        .iter()
        .filter_map(|line| line.trim().strip_prefix("Total reclaimed space: "))
        .filter_map(|size_str| utils::parse_size(size_str).ok())
        .next()
        .unwrap_or(0)
}

impl Cleaner for DockerResources {
    fn name(&self) -> &'static str {
        "docker"
    }

    fn label(&self) -> &'static str {
        "Docker Resources"
    }

    fn scan(&self) -> ScanResult {
        let lines = match system_df() {
            Ok(lines) => lines,
            Err(e) => {
                return ScanResult {
                    entries: Vec::new(),
                    total_bytes: 0,
                    errors: vec![format!("Docker not available: {e}")],
                };
            }
        };

        let mut entries = Vec::new();
        let mut total_bytes = 0u64;

        for (kind, bytes) in reclaimable_by_type(&lines) {
            if bytes == 0 {
                continue;
            }
            total_bytes += bytes;
            entries.push(ScanEntry {
                path: PathBuf::from(kind),
                size_bytes: bytes,
            });
        }

        ScanResult {
            entries,
            total_bytes,
            errors: Vec::new(),
        }
    }

    fn clean(&self, dry_run: bool) -> ScanResult {
        let mut result = self.scan();
        if dry_run || result.entries.is_empty() {
            return result;
        }

        let mut cmd = Command::new("docker");
        cmd.arg("system").arg("prune").arg("-f");

        match cmd::output_as_lines(cmd) {
            Ok(lines) => {
                result.total_bytes = reclaimed_total(&lines);
            }
            Err(e) => {
                result.errors.push(format!("prune failed: {e}"));
                result.total_bytes = 0;
            }
        }

        result
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reclaimable_by_type() {
        let lines = vec![
            "Images\t1.84GB\t1.204GB (65%)".to_string(),
            "Containers\t62.7MB\t0B (0%)".to_string(),
            "Local Volumes\t304MB\t304MB (100%)".to_string(),
            "Build Cache\t0B\t0B".to_string(),
        ];

        let parsed = reclaimable_by_type(&lines);
        assert_eq!(4, parsed.len());
        assert_eq!("Images", parsed[0].0);
        assert_eq!(1_292_785_156, parsed[0].1);
        assert_eq!(0, parsed[1].1);
        assert_eq!(("Local Volumes".to_string(), 318_767_104), parsed[2]);
    }

    #[test]
    fn test_reclaimed_total() {
        let lines = vec![
            "Deleted Containers:".to_string(),
            "f44f9b81948b".to_string(),
            "Total reclaimed space: 1.084GB".to_string(),
        ];
        assert_eq!(1_163_936_137, reclaimed_total(&lines));
    }

    #[test]
    fn test_reclaimed_total_absent() {
        assert_eq!(0, reclaimed_total(&["nothing to do".to_string()]));
    }
}
