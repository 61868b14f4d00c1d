//! # Item Identifiers
//!
//! Canonical item identifiers shared by rule lookup and checkout tallies.
//!
//! Both sides must canonicalize identically, otherwise "mug" would be
//! scanned into one bucket and priced from another. `ItemId` is the only
//! way to obtain a key, so the rule is enforced by the type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{validate_item_id, ValidationResult};

/// A validated, upper-cased item identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Validates and canonicalizes a raw identifier.
    ///
    /// ## Example
    /// ```rust
    /// use scanline_core::item::ItemId;
    ///
    /// let id = ItemId::parse(" mug ").unwrap();
    /// assert_eq!(id.as_str(), "MUG");
    /// assert_eq!(ItemId::parse(id.as_str()).unwrap(), id);
    /// assert!(ItemId::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        validate_item_id(raw)?;
        Ok(ItemId(raw.trim().to_uppercase()))
    }

    /// Returns the canonical form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = crate::error::ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        ItemId::parse(&raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
