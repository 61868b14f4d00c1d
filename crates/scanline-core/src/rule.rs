//! # Pricing Rules
//!
//! A `Rule` is the price of one item plus its quantity discount policy.
//!
//! ## Discount Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DiscountPolicy            total(count)                                 │
//! │  ─────────────             ────────────                                 │
//! │  None                      unit_price × count                           │
//! │                                                                         │
//! │  Group { size: 2 }         ceil(count / 2) × unit_price                 │
//! │  (buy 2, pay 1)            1 → 500, 2 → 500, 3 → 1000, 4 → 1000         │
//! │                                                                         │
//! │  VolumeBreak {             count <  3 → 2000 × count                    │
//! │    threshold: 3,           count >= 3 → 1900 × count (ALL units)        │
//! │    discounted: 1900 }      1 → 2000, 2 → 4000, 3 → 5700, 4 → 7600       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A policy replaces the line computation, it is never added on top of it.

use serde::Serialize;

use crate::money::Money;
use crate::validation::{
    validate_group_size, validate_price_cents, validate_threshold, ValidationResult,
};

// =============================================================================
// Discount Policy
// =============================================================================

/// Quantity discount applied to one item line.
///
/// Serialize-only: a policy reaches a [`Rule`] through [`Rule::new`], which
/// checks its parameters. Rule files go through
/// [`DiscountDescriptor`](crate::config::DiscountDescriptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiscountPolicy {
    /// Plain unit price × count.
    #[default]
    None,

    /// Every `group_size` units are billed as one unit.
    #[serde(rename_all = "camelCase")]
    Group { group_size: u32 },

    /// From `threshold` units upward, every unit costs `discounted_unit_price`.
    #[serde(rename_all = "camelCase")]
    VolumeBreak {
        threshold: u32,
        discounted_unit_price: Money,
    },
}

impl DiscountPolicy {
    /// Checks the policy parameters.
    pub fn validate(&self) -> ValidationResult<()> {
        match *self {
            DiscountPolicy::None => Ok(()),
            DiscountPolicy::Group { group_size } => validate_group_size(group_size),
            DiscountPolicy::VolumeBreak {
                threshold,
                discounted_unit_price,
            } => {
                validate_threshold(threshold)?;
                validate_price_cents("discountedUnitPrice", discounted_unit_price.cents())
            }
        }
    }

    /// Short label used on receipts and in logs.
    pub fn label(&self) -> String {
        match *self {
            DiscountPolicy::None => String::new(),
            DiscountPolicy::Group { group_size } => format!("{group_size} for 1"),
            DiscountPolicy::VolumeBreak {
                threshold,
                discounted_unit_price,
            } => format!("{discounted_unit_price} each from {threshold}"),
        }
    }
}

// =============================================================================
// Rule
// =============================================================================

/// Immutable price + discount policy for one item.
///
/// Only [`Rule::new`] builds one, so `group_size` and `threshold` are
/// always >= 1 and prices are within [`MAX_PRICE_CENTS`](crate::validation::MAX_PRICE_CENTS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    unit_price: Money,
    discount: DiscountPolicy,
}

impl Rule {
    /// Creates a rule after validating price and policy parameters.
    ///
    /// ## Example
    /// ```rust
    /// use scanline_core::money::Money;
    /// use scanline_core::rule::{DiscountPolicy, Rule};
    ///
    /// let voucher = Rule::new(Money::from_cents(500), DiscountPolicy::Group { group_size: 2 }).unwrap();
    /// assert_eq!(voucher.total(3).cents(), 1000);
    ///
    /// assert!(Rule::new(Money::from_cents(-1), DiscountPolicy::None).is_err());
    /// ```
    pub fn new(unit_price: Money, discount: DiscountPolicy) -> ValidationResult<Self> {
        validate_price_cents("price", unit_price.cents())?;
        discount.validate()?;
        Ok(Rule {
            unit_price,
            discount,
        })
    }

    /// A rule with no discount.
    pub fn flat(unit_price: Money) -> ValidationResult<Self> {
        Rule::new(unit_price, DiscountPolicy::None)
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn discount(&self) -> &DiscountPolicy {
        &self.discount
    }

    /// Total price for `count` units of this item.
    ///
    /// Callers pass the tallied count, which is always >= 1. A count of 0
    /// prices to zero under every policy.
    pub fn total(&self, count: u32) -> Money {
        match self.discount {
            DiscountPolicy::None => self.unit_price.multiply_quantity(count),
            DiscountPolicy::Group { group_size } => {
                self.unit_price.multiply_quantity(count.div_ceil(group_size))
            }
            DiscountPolicy::VolumeBreak {
                threshold,
                discounted_unit_price,
            } => {
                if count >= threshold {
                    discounted_unit_price.multiply_quantity(count)
                } else {
                    self.unit_price.multiply_quantity(count)
                }
            }
        }
    }

    /// Price of `count` units with no discount applied.
    #[inline]
    pub fn undiscounted(&self, count: u32) -> Money {
        self.unit_price.multiply_quantity(count)
    }

    /// How much the discount takes off `count` units.
    pub fn savings(&self, count: u32) -> Money {
        self.undiscounted(count) - self.total(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MAX_PRICE_CENTS;

    fn voucher() -> Rule {
        Rule::new(Money::from_cents(500), DiscountPolicy::Group { group_size: 2 }).unwrap()
    }

    fn tshirt() -> Rule {
        Rule::new(
            Money::from_cents(2000),
            DiscountPolicy::VolumeBreak {
                threshold: 3,
                discounted_unit_price: Money::from_cents(1900),
            },
        )
        .unwrap()
    }

    fn totals(rule: &Rule, counts: &[u32]) -> Vec<i64> {
        counts.iter().map(|&c| rule.total(c).cents()).collect()
    }

    #[test]
    fn test_flat_pricing() {
        let mug = Rule::flat(Money::from_cents(750)).unwrap();
        assert_eq!(totals(&mug, &[1, 2, 3]), vec![750, 1500, 2250]);
        assert!(mug.savings(3).is_zero());
    }

    #[test]
    fn test_group_pricing() {
        assert_eq!(totals(&voucher(), &[1, 2, 3, 4]), vec![500, 500, 1000, 1000]);
    }

    #[test]
    fn test_group_of_three() {
        let rule =
            Rule::new(Money::from_cents(100), DiscountPolicy::Group { group_size: 3 }).unwrap();
        assert_eq!(totals(&rule, &[1, 3, 4, 6, 7]), vec![100, 100, 200, 200, 300]);
    }

    #[test]
    fn test_group_of_one_is_flat() {
        let rule =
            Rule::new(Money::from_cents(250), DiscountPolicy::Group { group_size: 1 }).unwrap();
        assert_eq!(totals(&rule, &[1, 2, 5]), vec![250, 500, 1250]);
    }

    #[test]
    fn test_volume_break_applies_to_all_units() {
        assert_eq!(totals(&tshirt(), &[1, 2, 3, 4]), vec![2000, 4000, 5700, 7600]);
    }

    #[test]
    fn test_savings() {
        assert_eq!(voucher().savings(4).cents(), 1000);
        assert_eq!(tshirt().savings(2).cents(), 0);
        assert_eq!(tshirt().savings(3).cents(), 300);
    }

    #[test]
    fn test_zero_count_prices_to_zero() {
        assert!(voucher().total(0).is_zero());
        assert!(tshirt().total(0).is_zero());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(Rule::new(Money::from_cents(500), DiscountPolicy::Group { group_size: 0 }).is_err());
        assert!(Rule::new(
            Money::from_cents(2000),
            DiscountPolicy::VolumeBreak {
                threshold: 0,
                discounted_unit_price: Money::from_cents(1900),
            }
        )
        .is_err());
        assert!(Rule::new(
            Money::from_cents(2000),
            DiscountPolicy::VolumeBreak {
                threshold: 3,
                discounted_unit_price: Money::from_cents(-1),
            }
        )
        .is_err());
    }

    #[test]
    fn test_highest_price_and_count_do_not_overflow() {
        let top = Money::from_cents(MAX_PRICE_CENTS);
        let gold = Rule::flat(top).unwrap();
        assert_eq!(
            gold.total(u32::MAX).cents(),
            MAX_PRICE_CENTS * i64::from(u32::MAX)
        );

        let bulk = Rule::new(
            top,
            DiscountPolicy::VolumeBreak {
                threshold: 2,
                discounted_unit_price: top,
            },
        )
        .unwrap();
        assert!(bulk.savings(u32::MAX).is_zero());

        assert!(Rule::flat(Money::from_cents(MAX_PRICE_CENTS + 1)).is_err());
        assert!(Rule::flat(Money::from_cents(i64::MAX)).is_err());
    }

    #[test]
    fn test_zero_group_size_never_becomes_a_rule() {
        // Both construction paths validate; total() never sees a zero divisor.
        assert!(Rule::new(Money::from_cents(500), DiscountPolicy::Group { group_size: 0 }).is_err());

        let entry: crate::config::RuleEntry = serde_json::from_str(
            r#"{ "price": 500, "discountRule": { "kind": "group", "groupSize": 0 } }"#,
        )
        .unwrap();
        assert!(entry.to_rule().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(voucher()).unwrap();
        assert_eq!(json["unitPrice"], 500);
        assert_eq!(json["discount"]["kind"], "group");
        assert_eq!(json["discount"]["groupSize"], 2);

        let json = serde_json::to_value(tshirt().discount()).unwrap();
        assert_eq!(json["kind"], "volumeBreak");
        assert_eq!(json["threshold"], 3);
        assert_eq!(json["discountedUnitPrice"], 1900);

        let json = serde_json::to_value(DiscountPolicy::None).unwrap();
        assert_eq!(json["kind"], "none");
    }

    #[test]
    fn test_labels() {
        assert_eq!(voucher().discount().label(), "2 for 1");
        assert_eq!(tshirt().discount().label(), "19.00 each from 3");
        assert_eq!(DiscountPolicy::None.label(), "");
    }
}
