//! # Receipt
//!
//! The priced view of a checkout tally: one line per distinct item, the
//! items that could not be priced, and the sums.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::item::ItemId;
use crate::money::Money;
use crate::rule::{DiscountPolicy, Rule};
use crate::warning::PricingWarning;

/// One priced item line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub item: ItemId,
    pub count: u32,
    pub unit_price: Money,
    pub discount: DiscountPolicy,
    /// What the line would cost without its discount.
    pub undiscounted: Money,
    pub savings: Money,
    pub line_total: Money,
}

impl ReceiptLine {
    /// Prices `count` units of `item` under `rule`.
    pub fn price(item: ItemId, count: u32, rule: &Rule) -> Self {
        ReceiptLine {
            item,
            count,
            unit_price: rule.unit_price(),
            discount: *rule.discount(),
            undiscounted: rule.undiscounted(count),
            savings: rule.savings(count),
            line_total: rule.total(count),
        }
    }
}

/// Priced summary of one checkout session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub session_id: Uuid,
    pub opened_at: DateTime<Utc>,
    /// Priced lines in first-scanned order.
    pub lines: Vec<ReceiptLine>,
    /// Scanned items without a rule, with their counts.
    pub unpriced: Vec<(ItemId, u32)>,
    /// Sum of undiscounted line prices.
    pub subtotal: Money,
    pub savings: Money,
    /// Amount due in cents.
    pub total: Money,
    pub warnings: Vec<PricingWarning>,
}

impl Receipt {
    pub(crate) fn new(
        session_id: Uuid,
        opened_at: DateTime<Utc>,
        lines: Vec<ReceiptLine>,
        unpriced: Vec<(ItemId, u32)>,
    ) -> Self {
        let subtotal = lines.iter().map(|l| l.undiscounted).sum();
        let savings = lines.iter().map(|l| l.savings).sum();
        let total = lines.iter().map(|l| l.line_total).sum();
        let warnings = unpriced
            .iter()
            .map(|(item, _)| PricingWarning::Unpriced {
                item: item.to_string(),
            })
            .collect();

        Receipt {
            session_id,
            opened_at,
            lines,
            unpriced,
            subtotal,
            savings,
            total,
            warnings,
        }
    }

    /// Amount due in major units.
    #[inline]
    pub fn total_major(&self) -> Decimal {
        self.total.to_major()
    }

    /// True when every scanned item was priced.
    pub fn is_complete(&self) -> bool {
        self.unpriced.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    #[test]
    fn test_line_pricing() {
        let rule = Rule::new(Money::from_cents(500), DiscountPolicy::Group { group_size: 2 }).unwrap();
        let line = ReceiptLine::price(id("VOUCHER"), 3, &rule);
        assert_eq!(line.undiscounted.cents(), 1500);
        assert_eq!(line.savings.cents(), 500);
        assert_eq!(line.line_total.cents(), 1000);
    }

    #[test]
    fn test_sums_and_warnings() {
        let mug = Rule::flat(Money::from_cents(750)).unwrap();
        let voucher =
            Rule::new(Money::from_cents(500), DiscountPolicy::Group { group_size: 2 }).unwrap();
        let receipt = Receipt::new(
            Uuid::new_v4(),
            Utc::now(),
            vec![
                ReceiptLine::price(id("MUG"), 2, &mug),
                ReceiptLine::price(id("VOUCHER"), 2, &voucher),
            ],
            vec![(id("UNKNOWN"), 1)],
        );

        assert_eq!(receipt.subtotal.cents(), 2500);
        assert_eq!(receipt.savings.cents(), 500);
        assert_eq!(receipt.total.cents(), 2000);
        assert_eq!(receipt.total_major().to_string(), "20.00");
        assert!(!receipt.is_complete());
        assert_eq!(
            receipt.warnings,
            vec![PricingWarning::Unpriced {
                item: "UNKNOWN".to_string()
            }]
        );
    }

    #[test]
    fn test_line_serializes_discount_with_kind_tag() {
        let rule = Rule::new(Money::from_cents(500), DiscountPolicy::Group { group_size: 2 }).unwrap();
        let json = serde_json::to_value(ReceiptLine::price(id("VOUCHER"), 3, &rule)).unwrap();
        assert_eq!(json["discount"]["kind"], "group");
        assert_eq!(json["discount"]["groupSize"], 2);
        assert_eq!(json["lineTotal"], 1000);
    }
}
