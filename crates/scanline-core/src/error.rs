//! # Error Types
//!
//! Domain-specific error types for scanline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  scanline-core errors (this file)                                      │
//! │  ├── CoreError        - Fatal pricing/config failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  scanline-cli errors (app)                                             │
//! │  └── AppError         - File I/O, arguments, wraps CoreError           │
//! │                                                                         │
//! │  NOT errors: omitted rules and unpriced items. Those are              │
//! │  PricingWarning records (see `warning`), never a failed Result.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::item::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
///
/// Only structurally broken configuration and caller contract violations
/// end up here. Everything per-item is a warning.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The rule source is not a well-formed mapping of item to entry.
    ///
    /// ## When This Occurs
    /// - Rule text is not valid JSON
    /// - Top-level JSON value is an array, string, number...
    #[error("Invalid rule configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A scanned item has no rule and the checkout rejects unpriced items.
    #[error("No pricing rule for item: {0}")]
    NoRule(ItemId),

    /// Scanning `item` would push the checkout past its unit cap.
    #[error("Scanning {item} exceeds the maximum of {max} units per checkout")]
    QuantityOverflow { item: ItemId, max: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for bad identifiers at scan time and for bad rule parameters
/// at load time (where they are downgraded to warnings by the loader).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (bad characters, unknown discount kind...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. "mug" and "MUG" in one rule file).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
