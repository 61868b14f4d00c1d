//! # Rule Configuration Schema
//!
//! The declarative shape of a rule file and the built-in standard table.
//!
//! ## File Format
//! ```json
//! {
//!   "VOUCHER": { "price": 500,  "discountRule": { "kind": "group", "groupSize": 2 } },
//!   "TSHIRT":  { "price": 2000, "discountRule": { "kind": "volumeBreak", "threshold": 3, "discountedUnitPrice": 1900 } },
//!   "MUG":     { "price": 750 }
//! }
//! ```
//!
//! `discountRule.kind` is a closed set. New discount shapes are added as
//! new variants here and in [`DiscountPolicy`]; the file never carries
//! anything executable.
//!
//! Reading the file is the caller's job. This module only sees text.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rule::{DiscountPolicy, Rule};
use crate::validation::ValidationResult;

// =============================================================================
// Discount Descriptor
// =============================================================================

/// Discount selection as written in a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiscountDescriptor {
    #[default]
    None,

    #[serde(rename_all = "camelCase")]
    Group { group_size: u32 },

    #[serde(rename_all = "camelCase")]
    VolumeBreak {
        threshold: u32,
        discounted_unit_price: i64,
    },
}

impl From<DiscountDescriptor> for DiscountPolicy {
    fn from(descriptor: DiscountDescriptor) -> Self {
        match descriptor {
            DiscountDescriptor::None => DiscountPolicy::None,
            DiscountDescriptor::Group { group_size } => DiscountPolicy::Group { group_size },
            DiscountDescriptor::VolumeBreak {
                threshold,
                discounted_unit_price,
            } => DiscountPolicy::VolumeBreak {
                threshold,
                discounted_unit_price: Money::from_cents(discounted_unit_price),
            },
        }
    }
}

// =============================================================================
// Rule Entry
// =============================================================================

/// One item's entry in a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleEntry {
    /// Base unit price in cents.
    pub price: i64,

    /// Absent or null means no discount.
    #[serde(default)]
    pub discount_rule: Option<DiscountDescriptor>,
}

impl RuleEntry {
    /// Entry with no discount.
    pub const fn flat(price: i64) -> Self {
        RuleEntry {
            price,
            discount_rule: None,
        }
    }

    /// Resolves the entry into a validated [`Rule`].
    pub fn to_rule(&self) -> ValidationResult<Rule> {
        let discount = self.discount_rule.unwrap_or_default();
        Rule::new(Money::from_cents(self.price), discount.into())
    }
}

// =============================================================================
// Standard Table
// =============================================================================

/// The shop's standard price list.
///
/// Pass it to [`RuleSet::from_entries`](crate::ruleset::RuleSet::from_entries)
/// explicitly; nothing picks it up implicitly.
pub const STANDARD_RULES: &[(&str, RuleEntry)] = &[
    (
        "VOUCHER",
        RuleEntry {
            price: 500,
            discount_rule: Some(DiscountDescriptor::Group { group_size: 2 }),
        },
    ),
    (
        "TSHIRT",
        RuleEntry {
            price: 2000,
            discount_rule: Some(DiscountDescriptor::VolumeBreak {
                threshold: 3,
                discounted_unit_price: 1900,
            }),
        },
    ),
    ("MUG", RuleEntry::flat(750)),
];

// =============================================================================
// Rule Source
// =============================================================================

/// A parsed rule document whose entries have not been interpreted yet.
///
/// Entries stay as raw JSON so that one bad entry can be dropped without
/// losing the rest. They are kept in source order, and a key written twice
/// appears twice; the rule set keeps the first and warns about the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSource {
    entries: Vec<(String, Value)>,
}

impl RuleSource {
    /// Raw entries keyed as written in the source.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for RuleSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RuleSource;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object of item rules")
            }

            // serde_json::Map would collapse repeated keys to the last value
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(RuleSource { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parses rule text into a [`RuleSource`].
///
/// ## Errors
/// `CoreError::InvalidConfig` when the text is not JSON or the top-level
/// value is not an object. Individual entries are not inspected here.
///
/// ## Example
/// ```rust
/// use scanline_core::config::parse_rule_source;
///
/// let source = parse_rule_source(r#"{ "MUG": { "price": 750 } }"#).unwrap();
/// assert_eq!(source.len(), 1);
///
/// assert!(parse_rule_source("[1, 2, 3]").is_err());
/// ```
pub fn parse_rule_source(json: &str) -> CoreResult<RuleSource> {
    serde_json::from_str(json).map_err(|e| CoreError::InvalidConfig {
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
