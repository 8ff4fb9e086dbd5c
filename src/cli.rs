use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tidydeb",
    about = "A Debian cleanup tool — find and remove junk files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan for reclaimable space (dry-run, no deletion)
    Scan {
        /// Only scan a specific category
        #[arg(long)]
        category: Option<String>,

        /// Minimum file size for the large-file finder (e.g. "100MB", "1GB")
        #[arg(long, default_value = "100MB")]
        min_size: String,

        /// Root path for the large-file finder
        #[arg(long)]
        path: Option<String>,

        /// Journal retention window passed to journalctl (e.g. "7d", "2weeks")
        #[arg(long, default_value = "7d")]
        keep_logs: String,
    },

    /// Clean junk files (requires --confirm to actually delete)
    Clean {
        /// Actually delete files. Without this flag, behaves like scan.
        #[arg(long)]
        confirm: bool,

        /// Only clean a specific category
        #[arg(long)]
        category: Option<String>,

        /// Minimum file size for the large-file finder (e.g. "100MB", "1GB")
        #[arg(long, default_value = "100MB")]
        min_size: String,

        /// Root path for the large-file finder
        #[arg(long)]
        path: Option<String>,

        /// Journal retention window passed to journalctl (e.g. "7d", "2weeks")
        #[arg(long, default_value = "7d")]
        keep_logs: String,
    },

    /// Prune tags from a remote container registry
    Registry {
        /// Registry base URL (e.g. "https://registry.example.com")
        #[arg(long)]
        url: String,

        /// Registry username
        #[arg(long)]
        username: String,

        /// Registry password
        #[arg(long)]
        password: String,

        /// Actually delete manifests. Without this flag, reports what would go.
        #[arg(long)]
        confirm: bool,
    },
}
