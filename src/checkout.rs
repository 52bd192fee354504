//! Checkout
//!
//! Holds the scanned items for one customer and prices them on demand.

use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    config::{CheckoutConfig, ConfigError},
    items::Item,
    pipeline::Pipeline,
    pricing::{TotalPriceError, base_price, total_price},
    receipt::{Receipt, ReceiptError},
};

/// A single checkout
#[derive(Debug)]
pub struct Checkout<'a> {
    catalog: Catalog<'a>,
    pipeline: Pipeline<'a>,
    scanned: Vec<Item<'a>>,
}

impl Checkout<'static> {
    /// Create a checkout over the standard catalog with the given pricing rules.
    pub fn new(pipeline: Pipeline<'static>) -> Self {
        Self::with_catalog(Catalog::standard(), pipeline)
    }

    /// Create a checkout from a store configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured catalog or any rule is invalid.
    pub fn from_config(config: &CheckoutConfig) -> Result<Self, ConfigError> {
        let catalog = config.catalog()?;
        let pipeline = config.pipeline(&catalog)?;

        Ok(Self::with_catalog(catalog, pipeline))
    }
}

impl Default for Checkout<'static> {
    /// A checkout over the standard catalog with no pricing rules.
    fn default() -> Self {
        Self::new(Pipeline::new())
    }
}

impl<'a> Checkout<'a> {
    /// Create a checkout over a custom catalog.
    pub fn with_catalog(catalog: Catalog<'a>, pipeline: Pipeline<'a>) -> Self {
        Self {
            catalog,
            pipeline,
            scanned: Vec::new(),
        }
    }

    /// Scan a product by SKU.
    ///
    /// SKUs missing from the catalog are ignored.
    pub fn scan(&mut self, sku: &str) {
        let Some(product) = self.catalog.lookup(sku) else {
            tracing::debug!(sku, "ignoring unknown SKU");
            return;
        };

        tracing::debug!(sku, name = %product.name, "scanned");

        self.scanned.push(Item::new(product.clone()));
    }

    /// Items scanned so far, in scan order and without discounts.
    pub fn scanned(&self) -> &[Item<'a>] {
        &self.scanned
    }

    /// SKUs scanned so far, in scan order.
    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.scanned.iter().map(Item::sku)
    }

    /// Number of items scanned.
    pub fn len(&self) -> usize {
        self.scanned.len()
    }

    /// Check if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.scanned.is_empty()
    }

    /// The catalog scans are looked up in.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// The pricing rules applied at total time.
    pub fn pipeline(&self) -> &Pipeline<'a> {
        &self.pipeline
    }

    /// Scanned items after every pricing rule has been applied.
    ///
    /// Always recomputed from the scan list, so repeated calls agree.
    pub fn priced_items(&self) -> Vec<Item<'a>> {
        self.pipeline.apply(&self.scanned)
    }

    /// Total price after pricing rules.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a pricing rule produced an item in a
    /// different currency to the catalog.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        let total = total_price(&self.priced_items(), self.catalog.currency())?;

        tracing::debug!(items = self.scanned.len(), %total, "calculated total");

        Ok(total)
    }

    /// Total of the priced items at catalog prices, including any free items
    /// added by bundle rules. Matches [`Receipt::subtotal`].
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] on money arithmetic failure.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        base_price(&self.priced_items(), self.catalog.currency())
    }

    /// Build a receipt for the priced items.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the totals cannot be calculated.
    pub fn receipt(&self) -> Result<Receipt<'a>, ReceiptError> {
        Receipt::from_items(self.priced_items(), self.catalog.currency())
    }
}
