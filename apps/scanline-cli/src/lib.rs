//! # Scanline Register
//!
//! Thin command-line shell around `scanline-core`.
//!
//! ## Run Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppConfig (env + flags)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_rules ── file? ──► read_to_string ──► RuleSet::from_json_str      │
//! │       │      └─ none ──► RuleSet::from_entries(STANDARD_RULES)          │
//! │       ▼                                                                 │
//! │  Checkout::new(&rules) ──► scan_all(items)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  receipt() / strict_receipt() ──► render::write_receipt ──► stdout      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so stdout carries only the receipt.

pub mod config;
pub mod error;
pub mod render;

use std::fs;
use std::io::{BufRead, Write};

use scanline_core::{Checkout, Receipt, RuleSet, RuleSetBuild, STANDARD_RULES};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Filter used when `RUST_LOG` is unset or unparsable. Targets match by
/// prefix, so `scanline` covers both `scanline_core` and `scanline_cli`.
pub const DEFAULT_LOG_FILTER: &str = "info,scanline=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=warn` - Only unpriced items and omitted rules
/// - `RUST_LOG=scanline_core=trace` - Core crate only
/// - Default: [`DEFAULT_LOG_FILTER`], INFO overall and DEBUG (every scan)
///   for the scanline crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the rule set named by the configuration.
///
/// A missing or unreadable file, or one that is not a JSON object, is
/// fatal. Bad individual entries come back as warnings on the build.
pub fn load_rules(config: &AppConfig) -> AppResult<RuleSetBuild> {
    let build = match &config.rules_path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| AppError::RulesUnreadable {
                path: path.clone(),
                source,
            })?;
            RuleSet::from_json_str(&text)?
        }
        None => RuleSet::from_entries(STANDARD_RULES.iter().copied()),
    };

    let source = config
        .rules_path
        .as_deref()
        .map_or_else(|| "standard".to_string(), |p| p.display().to_string());
    info!(
        source = %source,
        rules = build.rule_set.len(),
        omitted = build.warnings.len(),
        "Rules loaded"
    );
    Ok(build)
}

/// Reads whitespace-separated item identifiers.
pub fn read_items<R: BufRead>(reader: R) -> AppResult<Vec<String>> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line?;
        items.extend(line.split_whitespace().map(str::to_string));
    }
    Ok(items)
}

/// Scans `items` against `build`, writes the receipt to `out` and returns it.
pub fn run<W: Write>(
    config: &AppConfig,
    build: &RuleSetBuild,
    items: &[String],
    out: &mut W,
) -> AppResult<Receipt> {
    let mut checkout = Checkout::new(&build.rule_set);
    checkout.scan_all(items)?;

    let receipt = if config.strict {
        checkout.strict_receipt()?
    } else {
        checkout.receipt()
    };

    if !receipt.is_complete() {
        warn!(
            session_id = %receipt.session_id,
            unpriced = receipt.unpriced.len(),
            "Total excludes unpriced items"
        );
    }

    render::write_receipt(out, &receipt, build, config.format)?;
    Ok(receipt)
}
