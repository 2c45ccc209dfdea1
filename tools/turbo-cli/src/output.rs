//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
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

    /// Print a rendered view, or its JSON form in JSON mode.
    pub fn view<T: Serialize>(&self, value: &T, rendered: &str) {
        if self.json {
            self.json(value);
        } else {
            print!("{}", rendered);
        }
    }

    /// Print JSON output.
    pub fn json<T: Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for a remote call.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored order status.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "confirmed" | "delivered" => style(status).green().to_string(),
        "pending" | "processing" | "shipped" => style(status).yellow().to_string(),
        "cancelled" => style(status).red().to_string(),
        _ => status.to_string(),
    }
}
