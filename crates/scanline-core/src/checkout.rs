//! # Checkout
//!
//! Per-transaction scan accumulator bound to a shared [`RuleSet`].
//!
//! ## Session Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Checkout = One Transaction                       │
//! │                                                                         │
//! │  Checkout::new(&rules)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  scan("voucher") ──► ItemId "VOUCHER" ──► tally[VOUCHER] += 1          │
//! │  scan("MUG")     ──► ItemId "MUG"     ──► tally[MUG]     += 1          │
//! │  scan_all([...]) ──► validate all, then += 1 each                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total() ──► Σ rule.total(count) over tally lines that have a rule     │
//! │              lines without a rule → 0 + PricingWarning::Unpriced       │
//! │                                                                         │
//! │  The tally is never reset; start a new Checkout for the next customer. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//! The rule set is borrowed immutably and may be shared by many lanes.
//! A `Checkout` itself is owned by one lane; there is no internal locking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::item::ItemId;
use crate::money::Money;
use crate::receipt::{Receipt, ReceiptLine};
use crate::ruleset::RuleSet;

/// Scan tally for a single transaction.
#[derive(Debug, Clone)]
pub struct Checkout<'r> {
    rules: &'r RuleSet,
    session_id: Uuid,
    opened_at: DateTime<Utc>,
    /// (item, count) in first-scanned order; every count >= 1.
    lines: Vec<(ItemId, u32)>,
    /// Position of each item in `lines`.
    index: HashMap<ItemId, usize>,
    /// Units scanned across all lines; capped at `u32::MAX` so that
    /// prices within `MAX_PRICE_CENTS` cannot overflow a total.
    units: u32,
}

impl<'r> Checkout<'r> {
    /// Opens a new, empty checkout session.
    pub fn new(rules: &'r RuleSet) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, rules = rules.len(), "Checkout opened");
        Checkout {
            rules,
            session_id,
            opened_at: Utc::now(),
            lines: Vec::new(),
            index: HashMap::new(),
            units: 0,
        }
    }

    #[inline]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    #[inline]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    #[inline]
    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Records one unit of `item`.
    ///
    /// ## Errors
    /// `CoreError::Validation` if the identifier is empty or malformed; the
    /// tally is left untouched.
    ///
    /// ## Example
    /// ```rust
    /// use scanline_core::config::STANDARD_RULES;
    /// use scanline_core::{Checkout, RuleSet};
    ///
    /// let rules = RuleSet::from_entries(STANDARD_RULES.iter().copied()).rule_set;
    /// let mut checkout = Checkout::new(&rules);
    /// checkout.scan("mug").unwrap();
    /// checkout.scan("MUG").unwrap();
    /// assert_eq!(checkout.count("Mug"), 2);
    /// assert!(checkout.scan("").is_err());
    /// ```
    pub fn scan(&mut self, item: &str) -> CoreResult<()> {
        let id = ItemId::parse(item)?;
        self.increment(id)
    }

    /// Records one unit of each identifier in `items`.
    ///
    /// Every identifier is validated, and the batch checked against the
    /// checkout's unit cap, before any is recorded, so a bad batch leaves
    /// the tally exactly as it was.
    pub fn scan_all<I, S>(&mut self, items: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = items
            .into_iter()
            .map(|item| ItemId::parse(item.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let fits = u32::try_from(ids.len())
            .ok()
            .and_then(|n| self.units.checked_add(n))
            .is_some();
        if let (false, Some(first)) = (fits, ids.first()) {
            return Err(CoreError::QuantityOverflow {
                item: first.clone(),
                max: u32::MAX,
            });
        }

        for id in ids {
            self.increment(id)?;
        }
        Ok(())
    }

    fn increment(&mut self, id: ItemId) -> CoreResult<()> {
        let Some(units) = self.units.checked_add(1) else {
            return Err(CoreError::QuantityOverflow {
                item: id,
                max: u32::MAX,
            });
        };

        // per-line counts never exceed `units`, so they cannot overflow
        let count = match self.index.get(&id) {
            Some(&pos) => {
                self.lines[pos].1 += 1;
                self.lines[pos].1
            }
            None => {
                self.index.insert(id.clone(), self.lines.len());
                self.lines.push((id.clone(), 1));
                1
            }
        };
        self.units = units;

        debug!(session_id = %self.session_id, item = %id, count, "Item scanned");
        Ok(())
    }

    // =========================================================================
    // Tally Queries
    // =========================================================================

    /// Units of `item` scanned so far (0 if never scanned or invalid).
    pub fn count(&self, item: &str) -> u32 {
        ItemId::parse(item)
            .ok()
            .and_then(|id| self.index.get(&id))
            .map_or(0, |&pos| self.lines[pos].1)
    }

    /// Tally lines in first-scanned order.
    pub fn lines(&self) -> &[(ItemId, u32)] {
        &self.lines
    }

    pub fn distinct_items(&self) -> usize {
        self.lines.len()
    }

    /// Units scanned across all items.
    #[inline]
    pub fn total_quantity(&self) -> u32 {
        self.units
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Prices the tally. Items without a rule are listed as unpriced,
    /// contribute nothing, and are logged at WARN.
    pub fn receipt(&self) -> Receipt {
        let mut priced = Vec::with_capacity(self.lines.len());
        let mut unpriced = Vec::new();

        for (item, count) in &self.lines {
            match self.rules.get_id(item) {
                Some(rule) => priced.push(ReceiptLine::price(item.clone(), *count, rule)),
                None => {
                    warn!(session_id = %self.session_id, item = %item, count, "No rule for item, skipping");
                    unpriced.push((item.clone(), *count));
                }
            }
        }

        let receipt = Receipt::new(self.session_id, self.opened_at, priced, unpriced);
        debug!(
            session_id = %self.session_id,
            total_cents = receipt.total.cents(),
            unpriced = receipt.unpriced.len(),
            "Checkout priced"
        );
        receipt
    }

    /// Like [`receipt`](Self::receipt), but fails on the first item
    /// (in scan order) that has no rule.
    pub fn strict_receipt(&self) -> CoreResult<Receipt> {
        if let Some((item, _)) = self
            .lines
            .iter()
            .find(|(item, _)| self.rules.get_id(item).is_none())
        {
            return Err(CoreError::NoRule(item.clone()));
        }
        Ok(self.receipt())
    }

    /// Amount due in cents.
    pub fn total_cents(&self) -> Money {
        self.receipt().total
    }

    /// Amount due in major units (exact, two decimal places).
    ///
    /// ## Example
    /// ```rust
    /// use scanline_core::config::STANDARD_RULES;
    /// use scanline_core::{Checkout, RuleSet};
    ///
    /// let rules = RuleSet::from_entries(STANDARD_RULES.iter().copied()).rule_set;
    /// let mut checkout = Checkout::new(&rules);
    /// checkout.scan_all(["VOUCHER", "TSHIRT", "MUG"]).unwrap();
    /// assert_eq!(checkout.total().to_string(), "32.50");
    /// ```
    pub fn total(&self) -> Decimal {
        self.total_cents().to_major()
    }

    /// Amount due in major units, failing if any scanned item has no rule.
    pub fn strict_total(&self) -> CoreResult<Decimal> {
        Ok(self.strict_receipt()?.total_major())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuleEntry, STANDARD_RULES};
    use crate::warning::PricingWarning;
    use rust_decimal::Decimal;

    fn standard() -> RuleSet {
        RuleSet::from_entries(STANDARD_RULES.iter().copied()).rule_set
    }

    fn total_for(rules: &RuleSet, items: &[&str]) -> Decimal {
        let mut checkout = Checkout::new(rules);
        for item in items {
            checkout.scan(item).unwrap();
        }
        checkout.total()
    }

    fn euros(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_scenario_voucher_tshirt_mug() {
        let rules = standard();
        assert_eq!(total_for(&rules, &["VOUCHER", "TSHIRT", "MUG"]), euros(3250));
    }

    #[test]
    fn test_scenario_two_vouchers() {
        let rules = standard();
        assert_eq!(total_for(&rules, &["VOUCHER", "TSHIRT", "VOUCHER"]), euros(2500));
    }

    #[test]
    fn test_scenario_four_tshirts() {
        let rules = standard();
        assert_eq!(
            total_for(&rules, &["TSHIRT", "TSHIRT", "TSHIRT", "VOUCHER", "TSHIRT"]),
            euros(8100)
        );
    }

    #[test]
    fn test_scenario_mixed() {
        let rules = standard();
        assert_eq!(
            total_for(
                &rules,
                &["VOUCHER", "TSHIRT", "VOUCHER", "VOUCHER", "MUG", "TSHIRT", "TSHIRT"]
            ),
            euros(7450)
        );
    }

    #[test]
    fn test_scenario_unknown_item_ignored() {
        let rules = standard();
        let items = [
            "UNKNOWN", "MUG", "VOUCHER", "VOUCHER", "MUG", "TSHIRT", "TSHIRT", "VOUCHER",
        ];
        let mut checkout = Checkout::new(&rules);
        checkout.scan_all(items).unwrap();

        assert_eq!(checkout.total(), euros(6500));
        assert_eq!(checkout.total().to_string(), "65.00");

        let receipt = checkout.receipt();
        assert_eq!(
            receipt.warnings,
            vec![PricingWarning::Unpriced {
                item: "UNKNOWN".to_string()
            }]
        );
        assert_eq!(receipt.unpriced.len(), 1);
    }

    #[test]
    fn test_case_insensitive_tally() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout.scan("mug").unwrap();
        checkout.scan("MUG").unwrap();
        checkout.scan("Mug").unwrap();

        assert_eq!(checkout.distinct_items(), 1);
        assert_eq!(checkout.count("mUG"), 3);
        assert_eq!(checkout.total_cents().cents(), 2250);
    }

    #[test]
    fn test_first_scanned_order() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout
            .scan_all(["mug", "voucher", "MUG", "tshirt", "VOUCHER"])
            .unwrap();

        let order: Vec<&str> = checkout.lines().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["MUG", "VOUCHER", "TSHIRT"]);
        assert_eq!(checkout.total_quantity(), 5);

        let receipt = checkout.receipt();
        let receipt_order: Vec<&str> = receipt
            .lines
            .iter()
            .map(|l| l.item.as_str())
            .collect();
        assert_eq!(receipt_order, order);
    }

    #[test]
    fn test_total_is_sum_of_rule_totals() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout
            .scan_all(["TSHIRT", "MUG", "TSHIRT", "NOPE", "VOUCHER", "TSHIRT", "VOUCHER", "VOUCHER"])
            .unwrap();

        let expected: Money = checkout
            .lines()
            .iter()
            .filter_map(|(id, count)| rules.get_id(id).map(|rule| rule.total(*count)))
            .sum();
        assert_eq!(checkout.total_cents(), expected);
        assert_eq!(expected.cents(), 5700 + 750 + 1000);
    }

    #[test]
    fn test_invalid_scan_rejected() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        assert!(matches!(checkout.scan(""), Err(CoreError::Validation(_))));
        assert!(matches!(checkout.scan("   "), Err(CoreError::Validation(_))));
        assert!(checkout.is_empty());
    }

    #[test]
    fn test_batch_scan_all_or_nothing() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout.scan("MUG").unwrap();

        let result = checkout.scan_all(["VOUCHER", "", "TSHIRT"]);
        assert!(result.is_err());
        assert_eq!(checkout.distinct_items(), 1);
        assert_eq!(checkout.count("VOUCHER"), 0);
        assert_eq!(checkout.count("MUG"), 1);

        checkout.units = u32::MAX - 1;
        assert!(matches!(
            checkout.scan_all(["MUG", "VOUCHER"]),
            Err(CoreError::QuantityOverflow { .. })
        ));
        assert_eq!(checkout.count("MUG"), 1);
        assert_eq!(checkout.total_quantity(), u32::MAX - 1);

        checkout.scan("VOUCHER").unwrap();
        assert_eq!(checkout.total_quantity(), u32::MAX);
    }

    #[test]
    fn test_unit_cap_rejects_further_scans() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout.scan("MUG").unwrap();
        checkout.units = u32::MAX;

        match checkout.scan("VOUCHER") {
            Err(CoreError::QuantityOverflow { item, max }) => {
                assert_eq!(item.as_str(), "VOUCHER");
                assert_eq!(max, u32::MAX);
            }
            other => panic!("expected QuantityOverflow, got {other:?}"),
        }
        assert_eq!(checkout.count("VOUCHER"), 0);
        assert_eq!(checkout.count("MUG"), 1);

        checkout.units = u32::MAX - 1;
        assert!(matches!(
            checkout.scan_all(["MUG", "VOUCHER"]),
            Err(CoreError::QuantityOverflow { .. })
        ));
        assert_eq!(checkout.count("MUG"), 1);
        assert_eq!(checkout.total_quantity(), u32::MAX - 1);

        checkout.scan("VOUCHER").unwrap();
        assert_eq!(checkout.total_quantity(), u32::MAX);
    }

    #[test]
    fn test_overpriced_rule_omitted_instead_of_overflowing() {
        let build = RuleSet::from_json_str(
            r#"{ "GOLD": { "price": 9223372036854775807 }, "MUG": { "price": 750 } }"#,
        )
        .unwrap();
        assert!(!build.rule_set.contains("GOLD"));
        assert_eq!(build.warnings.len(), 1);
        assert_eq!(build.warnings[0].item(), "GOLD");

        let mut checkout = Checkout::new(&build.rule_set);
        checkout.scan_all(["GOLD", "GOLD", "MUG"]).unwrap();
        assert_eq!(checkout.total(), euros(750));
    }

    #[test]
    fn test_highest_prices_sum_without_overflow() {
        use crate::validation::MAX_PRICE_CENTS;

        let build = RuleSet::from_entries([
            ("GOLD", RuleEntry::flat(MAX_PRICE_CENTS)),
            ("PLATINUM", RuleEntry::flat(MAX_PRICE_CENTS)),
        ]);
        assert!(build.warnings.is_empty());

        let mut checkout = Checkout::new(&build.rule_set);
        checkout.scan_all(["GOLD", "GOLD", "PLATINUM"]).unwrap();
        assert_eq!(checkout.total_cents().cents(), MAX_PRICE_CENTS * 3);
    }

    #[test]
    fn test_empty_checkout_totals_zero() {
        let rules = standard();
        let checkout = Checkout::new(&rules);
        assert!(checkout.is_empty());
        assert_eq!(checkout.total(), Decimal::ZERO);
        assert!(checkout.receipt().is_complete());
    }

    #[test]
    fn test_only_unknown_items_total_zero() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout.scan_all(["GHOST", "GHOST", "PHANTOM"]).unwrap();
        assert!(checkout.total_cents().is_zero());
        assert_eq!(checkout.receipt().warnings.len(), 2);
    }

    #[test]
    fn test_strict_mode() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout.scan_all(["MUG", "UNKNOWN", "VOUCHER"]).unwrap();

        match checkout.strict_total() {
            Err(CoreError::NoRule(item)) => assert_eq!(item.as_str(), "UNKNOWN"),
            other => panic!("expected NoRule, got {other:?}"),
        }
        // lenient total still works on the same tally
        assert_eq!(checkout.total(), euros(1250));

        let mut priced_only = Checkout::new(&rules);
        priced_only.scan_all(["MUG", "VOUCHER"]).unwrap();
        assert_eq!(priced_only.strict_total().unwrap(), euros(1250));
    }

    #[test]
    fn test_total_does_not_mutate() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout.scan_all(["TSHIRT", "TSHIRT", "TSHIRT"]).unwrap();
        let first = checkout.total();
        let second = checkout.total();
        assert_eq!(first, second);
        assert_eq!(checkout.count("TSHIRT"), 3);
    }

    #[test]
    fn test_running_total_across_scans() {
        let rules = standard();
        let mut checkout = Checkout::new(&rules);
        checkout.scan("TSHIRT").unwrap();
        checkout.scan("TSHIRT").unwrap();
        assert_eq!(checkout.total(), euros(4000));
        checkout.scan("TSHIRT").unwrap();
        assert_eq!(checkout.total(), euros(5700));
    }

    #[test]
    fn test_rule_set_shared_by_sessions() {
        let rules = RuleSet::from_entries([("PEN", RuleEntry::flat(120))]).rule_set;
        let mut lane_a = Checkout::new(&rules);
        let mut lane_b = Checkout::new(&rules);
        lane_a.scan("pen").unwrap();
        lane_b.scan_all(["pen", "pen"]).unwrap();

        assert_eq!(lane_a.total_cents().cents(), 120);
        assert_eq!(lane_b.total_cents().cents(), 240);
        assert_ne!(lane_a.session_id(), lane_b.session_id());
    }

    #[test]
    fn test_rule_set_shared_across_threads() {
        let rules = std::sync::Arc::new(standard());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let rules = std::sync::Arc::clone(&rules);
                std::thread::spawn(move || {
                    let mut checkout = Checkout::new(&rules);
                    checkout.scan_all(["VOUCHER", "VOUCHER", "MUG"]).unwrap();
                    checkout.total_cents().cents()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1250);
        }
    }
}
