//! # Pricing Warnings
//!
//! Non-fatal problems surfaced to the caller instead of failing a build
//! or a total. Each one is also logged at WARN when it is produced.

use serde::Serialize;
use std::fmt;

/// A non-fatal pricing problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PricingWarning {
    /// A rule entry was dropped while building the rule set.
    ///
    /// `item` is the key as written in the source; it may not be a valid
    /// identifier, which can be the reason it was dropped.
    RuleOmitted { item: String, reason: String },

    /// A scanned item had no rule and contributed nothing to the total.
    Unpriced { item: String },
}

impl PricingWarning {
    /// The item the warning is about.
    pub fn item(&self) -> &str {
        match self {
            PricingWarning::RuleOmitted { item, .. } | PricingWarning::Unpriced { item } => item,
        }
    }
}

impl fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingWarning::RuleOmitted { item, reason } => {
                write!(f, "rule for {item} omitted: {reason}")
            }
            PricingWarning::Unpriced { item } => write!(f, "no rule for item {item}"),
        }
    }
}
