use clap::{Parser, Subcommand};
use diskledger::config::Backend;

#[derive(Parser, Debug)]
#[command(name = "diskledger", bin_name = "diskledger", version)]
#[command(about = "Track storage disks, what lives on them and how much room is left", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage backend for this run (memory, file or remote)
    #[arg(long, global = true, value_name = "BACKEND")]
    pub backend: Option<Backend>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a disk
    #[command(alias = "a", display_order = 1)]
    Add {
        /// Disk name
        name: String,

        /// Total capacity in GB
        #[arg(short, long, value_name = "GB", allow_hyphen_values = true)]
        capacity: String,

        /// Content item as description:size (repeatable, or comma separated)
        #[arg(long = "content", value_name = "DESC:SIZE")]
        contents: Vec<String>,
    },

    /// List disks, optionally filtered
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Name contains (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Any content description contains (case-insensitive)
        #[arg(long)]
        content: Option<String>,

        /// At least this much free space, in GB
        #[arg(long, value_name = "GB", allow_negative_numbers = true)]
        min_free: Option<i64>,
    },

    /// Show one disk in full
    #[command(alias = "v", display_order = 3)]
    View {
        /// Disk id or unique id prefix
        id: String,
    },

    /// Change a disk; fields not given keep their current value
    #[command(alias = "e", display_order = 4)]
    Update {
        /// Disk id or unique id prefix
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New total capacity in GB
        #[arg(short, long, value_name = "GB", allow_hyphen_values = true)]
        capacity: Option<String>,

        /// Replace the contents with these items
        #[arg(long = "content", value_name = "DESC:SIZE")]
        contents: Vec<String>,

        /// Remove all contents
        #[arg(long, conflicts_with = "contents")]
        clear_contents: bool,
    },

    /// Delete a disk
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Disk id or unique id prefix
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Load sample disks into an empty store
    #[command(display_order = 6)]
    Seed,

    /// Get or set configuration
    #[command(display_order = 7)]
    Config {
        /// Configuration key (backend, table, remote-url, remote-key, timeout-secs)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
