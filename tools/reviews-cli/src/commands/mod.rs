//! CLI command implementations.

pub mod config;
pub mod fallback;
pub mod fetch;

use clap::{Args, Subcommand};

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Product identifier.
    pub product_id: String,

    /// Number of sequential requests (shows the breaker opening on failures).
    #[arg(short = 'n', long, default_value_t = 1)]
    pub repeat: u32,

    /// Print review bodies.
    #[arg(long)]
    pub content: bool,
}

/// Arguments for the fallback command.
#[derive(Args)]
pub struct FallbackArgs {
    /// Product identifier.
    pub product_id: String,

    /// Print review bodies.
    #[arg(long)]
    pub content: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (API key masked).
    Show,

    /// Write a default config file.
    Init {
        /// Base URL of the review API.
        #[arg(long, default_value = "http://localhost:7071/api")]
        base_url: String,

        /// Output file.
        #[arg(short, long, default_value = "reviews.toml")]
        output: String,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration.
    Validate,
}
