use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Get home directory or panic with a clear message.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Could not determine home directory")
}

/// Compute total size of a directory recursively.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Get size of a file or directory.
pub fn entry_size(path: &Path) -> u64 {
    if path.is_dir() {
        dir_size(path)
    } else {
        path.metadata().map(|m| m.len()).unwrap_or(0)
    }
}

/// True when running with effective uid 0.
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Parse a human-readable size string ("100MB", "1.5G", "58.3 kB") into bytes.
/// The unit suffix is case-insensitive and the trailing B is optional, which
/// covers both operator input and the figures apt and journalctl print.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    let (num_str, unit) = s.split_at(split);
    let unit = unit.trim().to_lowercase();

    let multiplier: u64 = match unit.as_str() {
        "" | "b" => 1,
        "k" | "kb" => 1_024,
        "m" | "mb" => 1_048_576,
        "g" | "gb" => 1_073_741_824,
        "t" | "tb" => 1_099_511_627_776,
        other => return Err(format!("Unknown size unit: '{other}'")),
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    Ok((num * multiplier as f64) as u64)
}

/// Format byte count as human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.2} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}

const RETENTION_UNITS: &[&str] = &[
    "s", "min", "h", "d", "w", "hour", "hours", "day", "days", "week", "weeks", "month", "months",
    "year", "years",
];

/// Validate a journal retention string ("7d", "2weeks") of the form
/// number + unit, where the unit is one journalctl accepts. A bare number
/// means seconds.
pub fn parse_retention(s: &str) -> Result<String, String> {
    let s = s.trim();
    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(split);

    if num.is_empty() {
        return Err(format!("Invalid retention '{s}': must start with a number"));
    }
    if !unit.is_empty() && !RETENTION_UNITS.contains(&unit) {
        return Err(format!("Invalid retention unit: '{unit}'"));
    }

    Ok(s.to_string())
}

/// Shorten a path for display by replacing home dir with ~.
pub fn display_path(path: &Path) -> String {
    let home = home_dir();
    if let Ok(relative) = path.strip_prefix(&home) {
        format!("~/{}", relative.display())
    } else {
        path.display().to_string()
    }
}
