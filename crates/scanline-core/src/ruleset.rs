//! # Rule Set
//!
//! Immutable lookup table from canonical item identifier to [`Rule`].
//!
//! ## Build Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RuleSet Construction                              │
//! │                                                                         │
//! │  rule text ──► parse_rule_source ──► RuleSource ──► from_source         │
//! │                    │                                    │               │
//! │                    └─ not an object?                    ├─ per entry:   │
//! │                       Err(InvalidConfig)  (fatal)       │  key invalid  │
//! │                                                         │  entry shape  │
//! │  STANDARD_RULES ──────────────────────► from_entries ───┤  parameters   │
//! │                                                         │  duplicate    │
//! │                                                         │  → omitted +  │
//! │                                                         │    warning    │
//! │                                                         ▼               │
//! │                                   RuleSetBuild { rule_set, warnings }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! After construction nothing can be added or removed. A `RuleSet` is
//! `Send + Sync` and can be shared by any number of checkouts.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::{parse_rule_source, RuleEntry, RuleSource};
use crate::error::{CoreResult, ValidationError};
use crate::item::ItemId;
use crate::rule::Rule;
use crate::warning::PricingWarning;

// =============================================================================
// RuleSet
// =============================================================================

/// Read-only mapping of item to pricing rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: HashMap<ItemId, Rule>,
}

/// A built rule set plus the entries that had to be left out.
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuild {
    pub rule_set: RuleSet,
    pub warnings: Vec<PricingWarning>,
}

impl RuleSet {
    /// Builds a rule set from already-typed entries.
    ///
    /// ## Example
    /// ```rust
    /// use scanline_core::config::STANDARD_RULES;
    /// use scanline_core::ruleset::RuleSet;
    ///
    /// let build = RuleSet::from_entries(STANDARD_RULES.iter().copied());
    /// assert!(build.warnings.is_empty());
    /// assert_eq!(build.rule_set.get("mug").unwrap().unit_price().cents(), 750);
    /// ```
    pub fn from_entries<I, K>(entries: I) -> RuleSetBuild
    where
        I: IntoIterator<Item = (K, RuleEntry)>,
        K: AsRef<str>,
    {
        let mut builder = Builder::default();
        for (key, entry) in entries {
            builder.insert(key.as_ref(), Ok(entry));
        }
        builder.finish()
    }

    /// Builds a rule set from a parsed source, entry by entry.
    pub fn from_source(source: &RuleSource) -> RuleSetBuild {
        let mut builder = Builder::default();
        for (key, value) in source.entries() {
            builder.insert(key, decode_entry(value));
        }
        builder.finish()
    }

    /// Parses rule text and builds from it.
    ///
    /// ## Errors
    /// Fails only when the text as a whole is unusable; see
    /// [`parse_rule_source`].
    ///
    /// ## Example
    /// ```rust
    /// use scanline_core::ruleset::RuleSet;
    ///
    /// let build = RuleSet::from_json_str(r#"{
    ///     "MUG": { "price": 750 },
    ///     "HAT": { "price": 900, "discountRule": { "kind": "mystery" } }
    /// }"#).unwrap();
    ///
    /// assert!(build.rule_set.contains("mug"));
    /// assert!(!build.rule_set.contains("hat"));
    /// assert_eq!(build.warnings.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> CoreResult<RuleSetBuild> {
        let source = parse_rule_source(json)?;
        Ok(RuleSet::from_source(&source))
    }

    /// Looks up the rule for a raw identifier, canonicalizing it first.
    ///
    /// An identifier that cannot be canonicalized has no rule.
    pub fn get(&self, item: &str) -> Option<&Rule> {
        let id = ItemId::parse(item).ok()?;
        self.rules.get(&id)
    }

    /// Looks up the rule for an already-canonical identifier.
    #[inline]
    pub fn get_id(&self, id: &ItemId) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.get(item).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Identifiers with a rule, sorted.
    pub fn item_ids(&self) -> Vec<&ItemId> {
        let mut ids: Vec<&ItemId> = self.rules.keys().collect();
        ids.sort();
        ids
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Default)]
struct Builder {
    rules: HashMap<ItemId, Rule>,
    warnings: Vec<PricingWarning>,
}

impl Builder {
    fn insert(&mut self, key: &str, entry: Result<RuleEntry, String>) {
        if let Err(reason) = self.try_insert(key, entry) {
            warn!(item = %key, reason = %reason, "Pricing rule omitted");
            self.warnings.push(PricingWarning::RuleOmitted {
                item: key.to_string(),
                reason,
            });
        }
    }

    fn try_insert(&mut self, key: &str, entry: Result<RuleEntry, String>) -> Result<(), String> {
        let id = ItemId::parse(key).map_err(|e| e.to_string())?;
        let rule = entry?.to_rule().map_err(|e| e.to_string())?;

        if self.rules.contains_key(&id) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: id.to_string(),
            }
            .to_string());
        }

        self.rules.insert(id, rule);
        Ok(())
    }

    fn finish(self) -> RuleSetBuild {
        debug!(
            rules = self.rules.len(),
            omitted = self.warnings.len(),
            "Rule set built"
        );
        RuleSetBuild {
            rule_set: RuleSet { rules: self.rules },
            warnings: self.warnings,
        }
    }
}

fn decode_entry(value: &Value) -> Result<RuleEntry, String> {
    RuleEntry::deserialize(value).map_err(|e| format!("malformed entry: {e}"))
}

// =============================================================================
// Unit Tests
// =============================================================================
