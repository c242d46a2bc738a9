use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::color::Background;

#[derive(Parser)]
#[command(
    name = "pngflat",
    about = "Flatten transparent PNGs onto a solid background"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (optional; defaults apply when it does not exist)
    #[arg(long, global = true, default_value = crate::config::CONFIG_NAME)]
    pub config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Composite one image onto an opaque background and write a new PNG
    Flatten {
        /// Source image (default: [flatten].input from config, or logo.png)
        input: Option<PathBuf>,

        /// Destination PNG (default: [flatten].output from config, or logo_white_bg.png)
        output: Option<PathBuf>,

        /// Background color, e.g. "#ffffff", "#fff", "255,255,255", "white"
        #[arg(long, short)]
        background: Option<Background>,
    },

    /// Remove the alpha channel from every PNG in a directory, in place
    Strip {
        /// Directory to process (default: [strip].dir from config, or icons)
        dir: Option<PathBuf>,

        /// Background color, e.g. "#ffffff", "#fff", "255,255,255", "white"
        #[arg(long, short)]
        background: Option<Background>,

        /// Overwrite files directly instead of via temporary file + rename
        #[arg(long)]
        no_atomic: bool,

        /// Report which files would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Print the per-file report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a pngflat.toml config file
    Init,
}
