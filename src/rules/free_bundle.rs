//! Free Bundle
//!
//! One free accessory with every trigger product, e.g. a free VGA adapter with
//! every Macbook Pro. When fewer accessories were scanned than trigger
//! products, free accessories are appended to the end of the list.

use crate::{
    catalog::{Catalog, MACBOOK_PRO, VGA_ADAPTER},
    items::{Item, count_sku},
    products::Product,
    rules::{PricingRule, RuleError, discount_first},
};

/// Free accessory bundled with a trigger product
#[derive(Debug, Clone, PartialEq)]
pub struct FreeBundleRule<'a> {
    name: String,
    trigger_sku: String,
    free: Product<'a>,
}

impl<'a> FreeBundleRule<'a> {
    /// Create a new free bundle rule giving away `free` with every `trigger_sku`.
    pub fn new(name: impl Into<String>, trigger_sku: impl Into<String>, free: Product<'a>) -> Self {
        Self {
            name: name.into(),
            trigger_sku: trigger_sku.into(),
            free,
        }
    }

    /// Create a new free bundle rule, resolving both SKUs from the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnknownSku`] if either SKU is not in the catalog.
    pub fn from_catalog(
        name: impl Into<String>,
        catalog: &Catalog<'a>,
        trigger_sku: &str,
        free_sku: &str,
    ) -> Result<Self, RuleError> {
        if !catalog.contains(trigger_sku) {
            return Err(RuleError::UnknownSku(trigger_sku.to_string()));
        }

        let free = catalog
            .lookup(free_sku)
            .cloned()
            .ok_or_else(|| RuleError::UnknownSku(free_sku.to_string()))?;

        Ok(Self::new(name, trigger_sku, free))
    }

    /// SKU that earns the free item
    pub fn trigger_sku(&self) -> &str {
        &self.trigger_sku
    }

    /// SKU given away
    pub fn free_sku(&self) -> &str {
        &self.free.sku
    }
}

impl<'a> PricingRule<'a> for FreeBundleRule<'a> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, items: &[Item<'a>]) -> Vec<Item<'a>> {
        let triggers = count_sku(items, &self.trigger_sku);
        let free = count_sku(items, self.free_sku());

        tracing::trace!(rule = %self.name, triggers, free, "free bundle");

        if triggers == 0 {
            return items.to_vec();
        }

        // Every scanned accessory is covered when triggers >= free, and only
        // the first `triggers` of them otherwise.
        let mut priced = discount_first(items, self.free_sku(), triggers, Item::free);

        let missing = triggers.saturating_sub(free);

        priced.extend(std::iter::repeat_n(Item::new(self.free.clone()).free(), missing));

        priced
    }
}

/// A free VGA adapter with every Macbook Pro
///
/// # Errors
///
/// Returns [`RuleError::UnknownSku`] if the catalog doesn't stock both products.
pub fn free_vga_on_macbook_pro<'a>(
    catalog: &Catalog<'a>,
) -> Result<FreeBundleRule<'a>, RuleError> {
    FreeBundleRule::from_catalog(
        "Free VGA adapter with Macbook Pro",
        catalog,
        MACBOOK_PRO,
        VGA_ADAPTER,
    )
}
