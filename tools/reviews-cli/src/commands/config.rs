//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use turbo_reviews::config::ENV_PREFIX;
use turbo_reviews::generate_default_config;
use turbo_reviews::telemetry::mask_secret;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init {
            base_url,
            output,
            force,
        } => init_config(&base_url, &output, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = ctx.reviews_config()?;
    let api = &config.review_api;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "config_path": ctx.config_path.as_ref().map(|p| p.display().to_string()),
            "review_api": {
                "base_url": api.base_url,
                "api_key": mask_secret(&api.api_key),
                "api_key_header_name": api.api_key_header_name,
                "timeout_seconds": api.timeout_seconds,
                "exceptions_allowed_before_breaking": api.exceptions_allowed_before_breaking,
                "circuit_breaker_duration_seconds": api.circuit_breaker_duration_seconds,
            }
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", &format!("<none, {}* only>", ENV_PREFIX)),
    }

    ctx.output.info("[review_api]");
    ctx.output.kv("base_url", &api.base_url);
    ctx.output.kv("api_key", &mask_secret(&api.api_key));
    ctx.output.kv("api_key_header_name", &api.api_key_header_name);
    ctx.output.kv("timeout_seconds", &api.timeout_seconds.to_string());
    ctx.output.kv(
        "exceptions_allowed_before_breaking",
        &api.exceptions_allowed_before_breaking.to_string(),
    );
    ctx.output.kv(
        "circuit_breaker_duration_seconds",
        &api.circuit_breaker_duration_seconds.to_string(),
    );

    Ok(())
}

fn init_config(base_url: &str, output: &str, force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(output);
    if path.exists() && !force {
        bail!("{} already exists. Use --force to overwrite.", path.display());
    }

    fs::write(&path, generate_default_config(base_url))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "created": path.display().to_string() }));
    } else {
        ctx.output.success(&format!("Created {}", path.display()));
        ctx.output.info(&format!("Set the API key with {}KEY", ENV_PREFIX));
    }

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.reviews_config()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "valid": true }));
    } else {
        ctx.output.success("Configuration is valid");
    }

    Ok(())
}
