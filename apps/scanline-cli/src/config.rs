//! # Register Configuration
//!
//! Settings for one register run.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--rules`, `--strict`, `--json`)
//! 2. Environment variables (`SCANLINE_*`)
//! 3. Defaults (this file)
//!
//! Read-only once built.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Parser, Debug, Default)]
#[command(name = "scanline", version, about = "Price a basket of scanned items")]
pub struct Args {
    /// JSON rule file. Defaults to the built-in standard price list.
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Fail instead of skipping items that have no rule.
    #[arg(long)]
    pub strict: bool,

    /// Print the receipt as JSON.
    #[arg(long)]
    pub json: bool,

    /// Item identifiers to scan. Read from stdin when none are given.
    #[arg(value_name = "ITEM")]
    pub items: Vec<String>,
}

/// Output format for the receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolved register settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Rule file to load; `None` uses the standard price list.
    pub rules_path: Option<PathBuf>,

    /// Reject unpriced items instead of warning.
    pub strict: bool,

    pub format: OutputFormat,
}

impl AppConfig {
    /// Builds configuration from the process environment and defaults.
    ///
    /// ## Environment Variables
    /// - `SCANLINE_RULES`: rule file path
    /// - `SCANLINE_STRICT`: `1`/`true`/`yes` enables strict pricing
    /// - `SCANLINE_FORMAT`: `text` or `json`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("SCANLINE_RULES").filter(|p| !p.trim().is_empty()) {
            config.rules_path = Some(PathBuf::from(path));
        }

        if let Some(strict) = lookup("SCANLINE_STRICT") {
            config.strict = parse_flag(&strict);
        }

        if let Some(format) = lookup("SCANLINE_FORMAT") {
            if format.trim().eq_ignore_ascii_case("json") {
                config.format = OutputFormat::Json;
            }
        }

        config
    }

    /// Applies command-line flags on top.
    ///
    /// Boolean flags can only switch a setting on.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(path) = &args.rules {
            self.rules_path = Some(path.clone());
        }
        if args.strict {
            self.strict = true;
        }
        if args.json {
            self.format = OutputFormat::Json;
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
