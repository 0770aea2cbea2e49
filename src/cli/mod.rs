//! Command-line interface definitions using clap

mod commands;

use clap::{Parser, Subcommand};

pub use commands::{generate_config, score_answers, status_map};

/// agentlink - referral attribution and lead scoring backend
#[derive(Parser)]
#[command(name = "agentlink")]
#[command(version)]
#[command(about = "Referral attribution, agent resolution and lead scoring backend", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Score questionnaire answers read as JSON
    Score {
        /// Answers file (default: stdin)
        #[arg(long)]
        file: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Map an external lead status string to the internal status
    StatusMap {
        /// Status text, e.g. "contacted"
        text: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
}
