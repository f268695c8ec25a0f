use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to `mtac.toml` in the config directory)
    #[arg(short, long, global = true)]
    pub conf: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a bundled tactic
    Run {
        /// Name of the tactic, see `mtac list`
        #[arg(value_name = "DEMO")]
        demo: String,
        /// Natural number the tactic is instantiated with
        #[arg(long)]
        arg: Option<usize>,
        /// Trace every machine step
        #[arg(short, long, default_value_t = false)]
        verbose: bool,
    },
    /// List the bundled tactics
    List {},
    /// Print the configuration in use
    Conf {},
}
