//! # scanline-core: Pure Checkout Pricing for Scanline
//!
//! Tallies scanned items and prices them with per-item rules, some of
//! which carry quantity discounts (buy-two-pay-one, bulk price breaks).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scanline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 scanline-cli (register binary)                  │   │
//! │  │     read rule file ──► scan arguments ──► print receipt         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ scanline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐    │   │
//! │  │   │  config  │──►│ ruleset  │◄──│ checkout │──►│ receipt  │    │   │
//! │  │   │ schema   │   │ RuleSet  │   │ Checkout │   │ Receipt  │    │   │
//! │  │   └──────────┘   └────┬─────┘   └──────────┘   └──────────┘    │   │
//! │  │                       │                                         │   │
//! │  │                  ┌────▼─────┐   ┌──────────┐   ┌──────────┐    │   │
//! │  │                  │   rule   │   │  money   │   │   item   │    │   │
//! │  │                  └──────────┘   └──────────┘   └──────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO NETWORK                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer cents, exact decimal totals
//! - [`item`] - Canonical item identifiers
//! - [`rule`] - `Rule` and `DiscountPolicy`
//! - [`config`] - Rule file schema and the standard price list
//! - [`ruleset`] - Immutable rule lookup
//! - [`checkout`] - Per-transaction scan tally
//! - [`receipt`] - Priced tally
//! - [`warning`] - Non-fatal pricing problems
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use scanline_core::config::STANDARD_RULES;
//! use scanline_core::{Checkout, RuleSet};
//!
//! let build = RuleSet::from_entries(STANDARD_RULES.iter().copied());
//! let rules = build.rule_set;
//!
//! let mut checkout = Checkout::new(&rules);
//! for item in ["TSHIRT", "TSHIRT", "TSHIRT", "VOUCHER", "TSHIRT"] {
//!     checkout.scan(item).unwrap();
//! }
//!
//! assert_eq!(checkout.total().to_string(), "81.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod item;
pub mod money;
pub mod receipt;
pub mod rule;
pub mod ruleset;
pub mod validation;
pub mod warning;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::Checkout;
pub use config::{DiscountDescriptor, RuleEntry, STANDARD_RULES};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::ItemId;
pub use money::Money;
pub use receipt::{Receipt, ReceiptLine};
pub use rule::{DiscountPolicy, Rule};
pub use ruleset::{RuleSet, RuleSetBuild};
pub use warning::PricingWarning;
