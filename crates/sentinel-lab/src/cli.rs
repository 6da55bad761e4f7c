use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sentinel-lab",
    version,
    about = "Interactive security-demo lab: payload transforms and a mock traffic inspector"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Log level (overrides config file setting)
    #[arg(long)]
    pub log_level: Option<String>,

    /// One-shot command; omit to start the interactive TUI
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obfuscate a payload, printing each transform layer
    Encode {
        payload: String,

        /// Skip the staged display delays
        #[arg(long)]
        no_delay: bool,

        /// Emit machine-readable JSON instead of log lines
        #[arg(long)]
        json: bool,
    },
    /// Recover a payload from its obfuscated form
    Decode {
        payload: String,

        /// Skip the staged display delays
        #[arg(long)]
        no_delay: bool,

        /// Emit machine-readable JSON instead of log lines
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a payload against the signature rule table
    Inspect {
        /// HTTP method of the simulated request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path of the simulated request
        #[arg(short, long, default_value = "/")]
        path: String,

        payload: String,

        /// Emit machine-readable JSON instead of a verdict line
        #[arg(long)]
        json: bool,
    },
}
