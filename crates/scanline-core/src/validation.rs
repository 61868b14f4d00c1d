//! # Validation Module
//!
//! Input validation for item identifiers and rule parameters.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Rule load (RuleSet build)                                             │
//! │  ├── validate_item_id         per entry key                            │
//! │  ├── validate_price_cents     base and discounted prices               │
//! │  └── validate_group_size / validate_threshold                          │
//! │      failure → entry omitted + PricingWarning                          │
//! │                                                                         │
//! │  Scan (Checkout)                                                       │
//! │  └── validate_item_id         failure → Err(ValidationError)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted item identifier, in characters.
pub const MAX_ITEM_ID_LEN: usize = 50;

/// Highest accepted unit price in cents.
///
/// A checkout tallies at most `u32::MAX` units in total, so with every
/// unit price at or below this bound no line, subtotal or total can
/// exceed `i64::MAX` cents.
pub const MAX_PRICE_CENTS: i64 = i64::MAX / u32::MAX as i64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item identifier (before canonicalization).
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 50 characters
/// - Only letters, digits, hyphens, underscores
///
/// ## Example
/// ```rust
/// use scanline_core::validation::validate_item_id;
///
/// assert!(validate_item_id("VOUCHER").is_ok());
/// assert!(validate_item_id("t-shirt_xl").is_ok());
/// assert!(validate_item_id("").is_err());
/// assert!(validate_item_id("two words").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    if id.chars().count() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "item id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - At most [`MAX_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use scanline_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("price", 750).is_ok());
/// assert!(validate_price_cents("price", 0).is_ok());
/// assert!(validate_price_cents("price", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a group size for grouped pricing. Must be at least 1.
pub fn validate_group_size(size: u32) -> ValidationResult<()> {
    if size == 0 {
        return Err(ValidationError::MustBePositive {
            field: "groupSize".to_string(),
        });
    }

    Ok(())
}

/// Validates a volume break threshold. Must be at least 1.
pub fn validate_threshold(threshold: u32) -> ValidationResult<()> {
    if threshold == 0 {
        return Err(ValidationError::MustBePositive {
            field: "threshold".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
