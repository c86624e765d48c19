//! Logging setup and log-safe formatting helpers.

use tracing_subscriber::EnvFilter;

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format (for development).
    #[default]
    Human,
    /// JSON format (for production/log aggregation).
    Json,
}

/// Install a global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise review crates log at `debug` when
/// `verbose` is set and at `info` otherwise.
pub fn init_tracing(
    verbose: bool,
    format: LogFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let default_directive = if verbose {
        "turbo_reviews=debug,turbo_data=debug,reviews=debug,warn"
    } else {
        "turbo_reviews=info,reviews=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.compact().try_init(),
    }
}

/// Mask a secret for logging, keeping at most its first four characters.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<empty>".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    if visible.chars().count() == secret.chars().count() {
        return "***".to_string();
    }
    format!("{}***", visible)
}
