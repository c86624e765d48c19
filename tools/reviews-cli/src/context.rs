//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_reviews::ReviewsConfig;

use crate::output::Output;

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_NAMES: [&str; 3] = ["reviews.toml", ".reviews.toml", "reviews.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Config file in effect, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Locate the config file. Loading is deferred until a command needs it.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve_path(&cwd, path)),
            None => find_config(&cwd),
        };
        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config_path,
            output,
            cwd,
        })
    }

    /// Load, override from the environment and validate the config.
    pub fn reviews_config(&self) -> Result<ReviewsConfig> {
        ReviewsConfig::resolve(self.config_path.as_deref()).with_context(|| {
            match &self.config_path {
                Some(path) => format!("Invalid configuration in {}", path.display()),
                None => "No config file found; set REVIEW_API_BASE_URL or run `reviews config init`"
                    .to_string(),
            }
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, path)
    }
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
