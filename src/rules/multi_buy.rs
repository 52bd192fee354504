//! Multi-buy
//!
//! Buy `buy` items of a SKU and pay for only `pay` of them, e.g. Apple TV 3 for 2.

use crate::{
    catalog::APPLE_TV,
    items::{Item, count_sku},
    rules::{PricingRule, RuleError, discount_first},
};

/// N-for-M multi-buy deal on a single SKU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiBuyRule {
    name: String,
    sku: String,
    buy: usize,
    pay: usize,
}

impl MultiBuyRule {
    /// Create a new multi-buy rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidQuantities`] if `buy` is zero or `pay` is not less than `buy`.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        buy: usize,
        pay: usize,
    ) -> Result<Self, RuleError> {
        if buy == 0 || pay >= buy {
            return Err(RuleError::InvalidQuantities { buy, pay });
        }

        Ok(Self {
            name: name.into(),
            sku: sku.into(),
            buy,
            pay,
        })
    }

    /// SKU the deal applies to
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Number of free items earned by `count` matching items
    pub fn free_items(&self, count: usize) -> usize {
        (count / self.buy) * (self.buy - self.pay)
    }
}

impl<'a> PricingRule<'a> for MultiBuyRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, items: &[Item<'a>]) -> Vec<Item<'a>> {
        let count = count_sku(items, &self.sku);
        let free = self.free_items(count);

        tracing::trace!(rule = %self.name, count, free, "multi-buy");

        discount_first(items, &self.sku, free, Item::free)
    }
}

/// Apple TV 3 for 2
pub fn apple_tv_deal() -> MultiBuyRule {
    MultiBuyRule {
        name: "Apple TV 3 for 2".to_string(),
        sku: APPLE_TV.to_string(),
        buy: 3,
        pay: 2,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalog::{Catalog, IPAD, MACBOOK_PRO},
        rules::test_support::items,
    };

    use super::*;

    fn discounted(items: &[Item<'_>], sku: &str) -> (usize, usize) {
        let matching = items.iter().filter(|item| item.is_sku(sku));
        let (with, without): (Vec<_>, Vec<_>) = matching.partition(|item| item.is_discounted());

        (with.len(), without.len())
    }

    #[test]
    fn five_apple_tvs_get_one_free() {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(APPLE_TV, 5), (IPAD, 2)]);

        let priced = apple_tv_deal().apply(&scanned);

        assert_eq!(discounted(&priced, APPLE_TV), (1, 4));
        assert_eq!(discounted(&priced, IPAD), (0, 2));
        assert!(
            priced
                .iter()
                .filter_map(Item::discounted_price)
                .all(|price| price.to_minor_units() == 0)
        );
    }

    #[test]
    fn two_apple_tvs_get_nothing_free() {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(APPLE_TV, 2), (MACBOOK_PRO, 5)]);

        let priced = apple_tv_deal().apply(&scanned);

        assert_eq!(discounted(&priced, APPLE_TV), (0, 2));
        assert_eq!(discounted(&priced, MACBOOK_PRO), (0, 5));
    }

    #[test]
    fn free_count_is_floor_of_count_over_three() {
        let catalog = Catalog::standard();
        let rule = apple_tv_deal();

        for n in 0..10 {
            let priced = rule.apply(&items(&catalog, &[(APPLE_TV, n)]));

            assert_eq!(discounted(&priced, APPLE_TV), (n / 3, n - n / 3), "n = {n}");
        }
    }

    #[test]
    fn first_occurrences_are_discounted() {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(IPAD, 1), (APPLE_TV, 3)]);

        let priced = apple_tv_deal().apply(&scanned);
        let flags: Vec<bool> = priced.iter().map(Item::is_discounted).collect();

        assert_eq!(flags, [false, true, false, false]);
    }

    #[test]
    fn input_is_left_untouched() {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(APPLE_TV, 3)]);

        let _priced = apple_tv_deal().apply(&scanned);

        assert!(scanned.iter().all(|item| !item.is_discounted()));
    }

    #[test]
    fn generalised_deal_frees_buy_minus_pay_per_group() -> TestResult {
        let catalog = Catalog::standard();
        let rule = MultiBuyRule::new("ipad 4 for 2", IPAD, 4, 2)?;

        let priced = rule.apply(&items(&catalog, &[(IPAD, 9)]));

        assert_eq!(discounted(&priced, IPAD), (4, 5));

        Ok(())
    }

    #[test]
    fn new_rejects_invalid_quantities() {
        assert_eq!(
            MultiBuyRule::new("bad", APPLE_TV, 0, 0),
            Err(RuleError::InvalidQuantities { buy: 0, pay: 0 })
        );
        assert_eq!(
            MultiBuyRule::new("bad", APPLE_TV, 2, 2),
            Err(RuleError::InvalidQuantities { buy: 2, pay: 2 })
        );
    }
}
