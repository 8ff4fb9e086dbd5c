use anyhow::{bail, Context};
use std::process::Command;

/// Returns a printable string of the given command.
pub fn format_command(cmd: &Command) -> String {
    format!(
        "{} {}",
        cmd.get_program().to_string_lossy(),
        cmd.get_args()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    )
}

/// Takes a command and returns its stdout as a Vec of lines.
pub fn output_as_lines(mut cmd: Command) -> anyhow::Result<Vec<String>> {
    let name = cmd.get_program().to_string_lossy().to_string();
    let raw_output = cmd
        .output()
        .with_context(|| format!("could not run {name}"))?;
    let string_output = String::from_utf8(raw_output.stdout)?;
    let lines: Vec<String> = string_output.lines().map(String::from).collect();

    Ok(lines)
}

/// Like output_as_lines(), but stderr lines are appended after stdout.
/// journalctl reports vacuum results on stderr.
pub fn all_output_lines(mut cmd: Command) -> anyhow::Result<Vec<String>> {
    let name = cmd.get_program().to_string_lossy().to_string();
    let raw_output = cmd
        .output()
        .with_context(|| format!("could not run {name}"))?;

    let mut lines: Vec<String> = String::from_utf8_lossy(&raw_output.stdout)
        .lines()
        .map(String::from)
        .collect();
    lines.extend(
        String::from_utf8_lossy(&raw_output.stderr)
            .lines()
            .map(String::from),
    );

    Ok(lines)
}

/// Run a command to completion, failing unless it exits zero.
pub fn run_checked(mut cmd: Command) -> anyhow::Result<()> {
    let printable = format_command(&cmd);
    let status = cmd
        .status()
        .with_context(|| format!("could not run {printable}"))?;

    if !status.success() {
        bail!("'{printable}' exited with {status}");
    }

    Ok(())
}
