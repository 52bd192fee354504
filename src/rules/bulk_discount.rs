//! Bulk Discount
//!
//! Buy more than a threshold quantity of a SKU and every one of them drops to
//! a fixed unit price. The threshold is all-or-nothing: crossing it discounts
//! the whole quantity, not just the excess.

use rusty_money::{
    Money,
    iso::{Currency, USD},
};

use crate::{
    catalog::IPAD,
    items::{Item, count_sku},
    rules::PricingRule,
};

/// Fixed unit price for a SKU bought in bulk
#[derive(Debug, Clone, PartialEq)]
pub struct BulkDiscountRule<'a> {
    name: String,
    sku: String,
    threshold: usize,
    price: Money<'a, Currency>,
}

impl<'a> BulkDiscountRule<'a> {
    /// Create a new bulk discount rule.
    ///
    /// Applies when strictly more than `threshold` items of `sku` are present.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        threshold: usize,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            threshold,
            price,
        }
    }

    /// SKU the discount applies to
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Discounted unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

impl<'a> PricingRule<'a> for BulkDiscountRule<'a> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, items: &[Item<'a>]) -> Vec<Item<'a>> {
        let count = count_sku(items, &self.sku);

        if count <= self.threshold {
            return items.to_vec();
        }

        tracing::trace!(rule = %self.name, count, "bulk discount");

        items
            .iter()
            .map(|item| {
                if item.is_sku(&self.sku) {
                    item.with_discounted_price(self.price)
                } else {
                    item.clone()
                }
            })
            .collect()
    }
}

/// The `Super iPad` drops to 499.99 each when more than 4 are bought
pub fn bulk_discount_on_ipad() -> BulkDiscountRule<'static> {
    BulkDiscountRule::new(
        "Super iPad bulk discount",
        IPAD,
        4,
        Money::from_minor(49999, USD),
    )
}
