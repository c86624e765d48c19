//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use turbo_commerce::{ProductReviews, Review, ReviewStatus};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a review set with its summary line.
    pub fn reviews(&self, reviews: &ProductReviews, show_content: bool) {
        if self.json {
            return;
        }
        let stats = reviews.stats();
        self.kv("product", stats.product_id().as_str());
        self.kv("reviews", &stats.review_count().to_string());
        self.kv("average", &format!("{:.1}", stats.average_rating()));

        for review in reviews.reviews() {
            self.review(review, show_content);
        }
    }

    fn review(&self, review: &Review, show_content: bool) {
        println!(
            "  {} {} {} {}",
            style(review.render_stars()).yellow(),
            style(review.title()).bold(),
            style(format!("by {}", review.customer_name())).dim(),
            status_badge(review.status()),
        );
        println!(
            "      {}",
            style(review.created_at().format("%Y-%m-%d %H:%M UTC")).dim()
        );
        if show_content {
            println!("      {}", review.content());
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored moderation status.
pub fn status_badge(status: ReviewStatus) -> String {
    match status {
        ReviewStatus::Approved => style(status.as_str()).green().to_string(),
        ReviewStatus::Pending => style(status.as_str()).yellow().to_string(),
        ReviewStatus::Rejected => style(status.as_str()).red().to_string(),
    }
}
