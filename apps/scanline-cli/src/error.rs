//! # Register Error Type
//!
//! Everything that can stop a register run.
//!
//! ```text
//! CoreError ───────────────┐
//! rule file read failure ──┼──► AppError ──► main() ──► stderr + exit 1
//! stdin / stdout failure ──┘
//! ```
//!
//! Omitted rules and unpriced items are not here: they are warnings and the
//! run still prints a receipt.

use std::io;
use std::path::PathBuf;

use scanline_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The rule file could not be read.
    #[error("Cannot read rule file {}: {source}", path.display())]
    RulesUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading scanned items or writing the receipt failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot encode receipt: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AppResult<T> = Result<T, AppError>;
