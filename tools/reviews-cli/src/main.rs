//! Reviews CLI - inspect product reviews served through the circuit breaker.
//!
//! Commands:
//! - `reviews fetch` - Fetch reviews from the review API (with fallback)
//! - `reviews fallback` - Show the synthetic reviews for a product
//! - `reviews config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use turbo_reviews::{init_tracing, LogFormat};

use commands::{ConfigArgs, FallbackArgs, FetchArgs};

/// Reviews CLI - Fetch product reviews and inspect fallback behavior
#[derive(Parser)]
#[command(name = "reviews")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch reviews for a product
    Fetch(FetchArgs),

    /// Show the fallback reviews for a product
    Fallback(FallbackArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Human
    };
    init_tracing(cli.verbose, format).map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args, &ctx).await,
        Commands::Fallback(args) => commands::fallback::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
