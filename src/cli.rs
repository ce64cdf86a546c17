use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "planboard")]
#[command(version)]
#[command(about = "Plan tasks across a someday backlog and a day-by-day timeline")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Start with an empty board instead of the sample tasks
    #[arg(long, global = true)]
    pub no_demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the board and exit
    Board {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Render as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}
