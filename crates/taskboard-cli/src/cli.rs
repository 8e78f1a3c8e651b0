use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "Board status engine driver")]
pub struct Cli {
    /// Configuration file (defaults to ./taskboard.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a scripted board session against in-memory stores.
    Demo,

    /// Partition a JSON task snapshot and print the derived board fields.
    Derive {
        /// File holding a JSON array of task documents ("-" for stdin).
        snapshot: PathBuf,

        /// Board id used in diagnostics.
        #[arg(long, default_value = "board")]
        board: String,
    },
}
