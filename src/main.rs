mod categories;
mod cleaner;
mod cli;
mod cmd;
mod disk_info;
mod executor;
mod menu;
mod output;
mod registry;
mod term;
mod utils;

use anyhow::Context;
use clap::Parser;
use cleaner::Cleaner;
use std::path::Path;
use std::process::exit;

fn main() {
    if let Err(e) = run() {
        output::print_warning(&format!("{e:#}"));
        exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Scan {
            category,
            min_size,
            path,
            keep_logs,
        } => {
            let min_bytes = utils::parse_size(&min_size).map_err(anyhow::Error::msg)?;
            let keep = utils::parse_retention(&keep_logs).map_err(anyhow::Error::msg)?;
            run_scan(category.as_deref(), min_bytes, path.as_deref(), &keep)
        }
        cli::Command::Clean {
            confirm,
            category,
            min_size,
            path,
            keep_logs,
        } => {
            let min_bytes = utils::parse_size(&min_size).map_err(anyhow::Error::msg)?;
            let keep = utils::parse_retention(&keep_logs).map_err(anyhow::Error::msg)?;
            if !confirm {
                output::print_no_confirm_warning();
                return run_scan(category.as_deref(), min_bytes, path.as_deref(), &keep);
            }
            run_clean(category.as_deref(), min_bytes, path.as_deref(), &keep)
        }
        cli::Command::Registry {
            url,
            username,
            password,
            confirm,
        } => run_registry(&url, &username, &password, confirm),
    }
}

fn cleaners_for(
    category: Option<&str>,
    min_bytes: u64,
    path: Option<&str>,
    keep: &str,
) -> anyhow::Result<Vec<Box<dyn Cleaner>>> {
    match category {
        Some(name) => {
            let cleaner = categories::find_cleaner(name, min_bytes, path, keep)
                .with_context(|| {
                    format!(
                        "unknown category '{name}'; known categories: {}",
                        categories::all_cleaner_names().join(", ")
                    )
                })?;
            Ok(vec![cleaner])
        }
        None => Ok(categories::all_cleaners(min_bytes, path, keep)),
    }
}

fn print_header(path: Option<&str>) {
    output::print_banner();
    let probe = Path::new(path.unwrap_or("/"));
    if let Some(info) = disk_info::get_disk_info(probe) {
        output::print_disk_usage(
            &utils::format_size(info.total),
            &utils::format_size(info.available),
            info.usage_percent(),
        );
    }
}

fn entry_size_label(size_bytes: u64) -> String {
    if size_bytes > 0 {
        utils::format_size(size_bytes)
    } else {
        String::new()
    }
}

fn run_scan(
    category: Option<&str>,
    min_bytes: u64,
    path: Option<&str>,
    keep: &str,
) -> anyhow::Result<()> {
    print_header(path);
    let cleaners = cleaners_for(category, min_bytes, path, keep)?;

    let mut summary = Vec::new();
    let mut grand_total = 0u64;

    for cleaner in &cleaners {
        let result = cleaner.scan();

        output::print_scan_header(cleaner.label());
        for entry in &result.entries {
            output::print_scan_entry(
                &utils::display_path(&entry.path),
                &entry_size_label(entry.size_bytes),
            );
        }
        for error in &result.errors {
            output::print_warning(error);
        }
        output::print_category_total(cleaner.label(), &utils::format_size(result.total_bytes));

        grand_total += result.total_bytes;
        summary.push((
            cleaner.label(),
            result.total_bytes,
            cleaner.name() == "large-files",
        ));
    }

    output::print_summary_header();
    for (label, total, report_only) in &summary {
        if *report_only {
            output::print_summary_row_report_only(label, &utils::format_size(*total));
        } else {
            output::print_summary_row(label, &utils::format_size(*total));
        }
    }
    output::print_separator();
    output::print_grand_total(&utils::format_size(grand_total));
    output::print_dry_run_footer();

    Ok(())
}

fn run_clean(
    category: Option<&str>,
    min_bytes: u64,
    path: Option<&str>,
    keep: &str,
) -> anyhow::Result<()> {
    print_header(path);
    if !utils::is_root() {
        output::print_warning("not running as root; system categories may fail");
    }

    let cleaners = cleaners_for(category, min_bytes, path, keep)?;
    let mut total_freed = 0u64;

    for cleaner in &cleaners {
        output::print_scan_header(cleaner.label());

        if cleaner.name() == "large-files" {
            total_freed += clean_large_files(cleaner.as_ref())?;
            continue;
        }

        let result = cleaner.clean(false);
        for entry in &result.entries {
            output::print_deleted(
                &utils::display_path(&entry.path),
                &entry_size_label(entry.size_bytes),
            );
        }
        for error in &result.errors {
            output::print_warning(error);
        }
        output::print_category_total(cleaner.label(), &utils::format_size(result.total_bytes));
        total_freed += result.total_bytes;
    }

    output::print_clean_complete(&utils::format_size(total_freed));
    Ok(())
}

/// Large files are deleted one by one, picked through the interactive
/// menu. Cancelling the menu skips the category and is not an error.
fn clean_large_files(cleaner: &dyn Cleaner) -> anyhow::Result<u64> {
    let result = cleaner.scan();
    for error in &result.errors {
        output::print_warning(error);
    }
    if result.entries.is_empty() {
        output::print_info("no files over the size threshold");
        return Ok(0);
    }

    let mut console = term::RawConsole::new()?;
    let menu_result = menu::Menu::new(&result.entries).run(&mut console)?;
    drop(console);

    match menu_result {
        menu::MenuResult::Cancelled => {
            output::print_info("selection cancelled, nothing deleted");
            Ok(0)
        }
        menu::MenuResult::Confirmed(picked) => {
            let report = menu::delete_selected(&result.entries, &picked, executor::remove_path);
            for error in &report.errors {
                output::print_warning(error);
            }
            output::print_info(&format!(
                "{} deleted, {} failed",
                report.deleted, report.failed
            ));
            output::print_category_total(cleaner.label(), &utils::format_size(report.bytes_freed));
            Ok(report.bytes_freed)
        }
    }
}

fn run_registry(url: &str, username: &str, password: &str, confirm: bool) -> anyhow::Result<()> {
    output::print_banner();
    if !confirm {
        output::print_info("report mode: digests are resolved but nothing is deleted (pass --confirm to delete)");
        println!();
    }

    let endpoint = registry::RegistryEndpoint::new(url, username, password)?;
    let client = registry::RegistryClient::connect(endpoint)?;
    registry::run(&client, !confirm)?;

    Ok(())
}
