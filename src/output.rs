use colored::Colorize;

pub fn print_banner() {
    println!("{}", "tidydeb - Debian Cleanup Tool v0.2.0".bold().cyan());
    println!();
}

pub fn print_disk_usage(total: &str, available: &str, percent: f32) {
    println!(
        "  {} {} total, {} free ({:.0}% used)",
        "Disk:".bold(),
        total,
        available.green(),
        percent
    );
    println!();
}

pub fn print_scan_header(label: &str) {
    println!("{}", format!("=== {label} ===").bold().white());
}

pub fn print_scan_entry(path: &str, size: &str) {
    if size.is_empty() {
        println!("  {}", path.dimmed());
    } else {
        println!("  {}  {}", path.dimmed(), size.yellow());
    }
}

pub fn print_category_total(label: &str, total: &str) {
    println!("  {} {}", format!("{label} total:").bold(), total.green());
    println!();
}

pub fn print_summary_header() {
    println!("{}", "=== Summary ===".bold().white());
}

pub fn print_summary_row(label: &str, size: &str) {
    println!("  {:<30} {}", label, size.green());
}

pub fn print_summary_row_report_only(label: &str, size: &str) {
    println!(
        "  {:<30} {}  {}",
        label,
        size.green(),
        "[report only]".dimmed()
    );
}

pub fn print_separator() {
    println!("  {}", "─".repeat(45).dimmed());
}

pub fn print_grand_total(total: &str) {
    println!(
        "  {:<30} {}",
        "Total reclaimable:".bold(),
        total.green().bold()
    );
    println!();
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "Warning:".red().bold(), msg.red());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}

pub fn print_dry_run_footer() {
    println!(
        "{}",
        "This was a dry run. Run `tidydeb clean --confirm` to delete."
            .yellow()
            .bold()
    );
}

pub fn print_clean_complete(freed: &str) {
    println!(
        "{} {}",
        "Cleaned!".green().bold(),
        format!("{freed} freed.").green()
    );
}

pub fn print_deleted(path: &str, size: &str) {
    println!("  {} {}  {}", "Deleted".red(), path.dimmed(), size.yellow());
}

pub fn print_no_confirm_warning() {
    println!(
        "{}",
        "No --confirm flag provided. Running as dry-run scan."
            .yellow()
            .bold()
    );
    println!();
}

pub fn print_repository_line(index: usize, name: &str) {
    println!("  {:>3}  {}", index, name);
}

pub fn print_tag_deleted(repo: &str, tag: &str) {
    println!("  {} {}:{}", "Deleted".red(), repo.dimmed(), tag);
}

pub fn print_tag_would_delete(repo: &str, tag: &str, digest: &str) {
    println!(
        "  {} {}:{} ({})",
        "Would delete".yellow(),
        repo.dimmed(),
        tag,
        digest.dimmed()
    );
}

pub fn print_tag_error(repo: &str, tag: &str, err: &str) {
    println!(
        "  {} {}:{} — {}",
        "Failed".red().bold(),
        repo.dimmed(),
        tag,
        err.red()
    );
}

pub fn print_prune_summary(deleted: usize, failed: usize) {
    println!();
    println!(
        "  {} {} deleted, {} failed",
        "Registry:".bold(),
        deleted.to_string().green(),
        failed.to_string().red()
    );
}

pub fn print_gc_reminder() {
    println!(
        "{}",
        "Manifests are deleted, but disk space is only reclaimed once the \
         registry runs its own garbage collection."
            .yellow()
    );
}
