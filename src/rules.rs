//! Pricing Rules
//!
//! A pricing rule takes the whole current list of line items and returns a new
//! list, annotating matching items with discounted prices. Rules never mutate
//! their input, and never remove items; the free bundle rule may append
//! synthetic items to the end of the list.
//!
//! Rules are expected to target disjoint SKU sets. When two rules match the
//! same SKU the later rule sees, and may overwrite, the earlier rule's prices.

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    items::Item,
    prices::{PriceError, parse_price},
};

pub mod bulk_discount;
pub mod free_bundle;
pub mod multi_buy;

#[cfg(test)]
pub(crate) mod test_support;

pub use bulk_discount::{BulkDiscountRule, bulk_discount_on_ipad};
pub use free_bundle::{FreeBundleRule, free_vga_on_macbook_pro};
pub use multi_buy::{MultiBuyRule, apple_tv_deal};

/// Errors raised while building pricing rules.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    /// A rule refers to a SKU the catalog doesn't stock.
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// A multi-buy rule must charge for fewer items than it groups, and group at least one.
    #[error("Invalid multi-buy quantities: buy {buy}, pay {pay}")]
    InvalidQuantities {
        /// Group size
        buy: usize,
        /// Number of items charged per group
        pay: usize,
    },

    /// A rule price is in a different currency to the catalog (expected, found).
    #[error("Rule price has currency {1}, but catalog has currency {0}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Invalid rule price.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// A list-to-list pricing transformation.
///
/// Implemented by the built-in rules and by any `Fn(&[Item]) -> Vec<Item>` closure.
pub trait PricingRule<'a> {
    /// Human readable rule name, used in logs.
    #[expect(
        clippy::unnecessary_literal_bound,
        reason = "built-in rules return their owned names"
    )]
    fn name(&self) -> &str {
        "custom rule"
    }

    /// Apply the rule to the full current item list.
    fn apply(&self, items: &[Item<'a>]) -> Vec<Item<'a>>;
}

impl<'a, F> PricingRule<'a> for F
where
    F: Fn(&[Item<'a>]) -> Vec<Item<'a>>,
{
    fn apply(&self, items: &[Item<'a>]) -> Vec<Item<'a>> {
        self(items)
    }
}

/// Boxed pricing rule, as stored in a pipeline.
pub type BoxedRule<'a> = Box<dyn PricingRule<'a> + 'a>;

/// Pricing rule configuration from YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Buy `buy` of a SKU, pay for `pay`
    MultiBuy {
        /// Rule name
        #[serde(default)]
        name: Option<String>,

        /// SKU the deal applies to
        sku: String,

        /// Group size
        buy: usize,

        /// Number of items charged per group
        pay: usize,
    },

    /// Fixed unit price for every item of a SKU once more than `threshold` are bought
    BulkDiscount {
        /// Rule name
        #[serde(default)]
        name: Option<String>,

        /// SKU the discount applies to
        sku: String,

        /// Quantity that must be exceeded
        threshold: usize,

        /// Discounted unit price, e.g. `499.99 USD`
        price: String,
    },

    /// One free `free` item with every `trigger` item
    FreeBundle {
        /// Rule name
        #[serde(default)]
        name: Option<String>,

        /// SKU that earns the free item
        trigger: String,

        /// SKU given away
        free: String,
    },
}

impl RuleConfig {
    /// Build the configured rule against a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule references a SKU missing from the catalog,
    /// has invalid quantities, or is priced in a different currency.
    pub fn build<'a>(&self, catalog: &Catalog<'a>) -> Result<BoxedRule<'a>, RuleError> {
        match self {
            RuleConfig::MultiBuy {
                name,
                sku,
                buy,
                pay,
            } => {
                ensure_stocked(catalog, sku)?;

                let name = name
                    .clone()
                    .unwrap_or_else(|| format!("{sku} {buy} for {pay}"));

                Ok(Box::new(MultiBuyRule::new(name, sku.clone(), *buy, *pay)?))
            }
            RuleConfig::BulkDiscount {
                name,
                sku,
                threshold,
                price,
            } => {
                ensure_stocked(catalog, sku)?;

                let (minor_units, currency) = parse_price(price)?;

                ensure_priced_in(catalog, currency)?;

                let name = name
                    .clone()
                    .unwrap_or_else(|| format!("{sku} bulk discount over {threshold}"));

                Ok(Box::new(BulkDiscountRule::new(
                    name,
                    sku.clone(),
                    *threshold,
                    Money::from_minor(minor_units, catalog.currency()),
                )))
            }
            RuleConfig::FreeBundle {
                name,
                trigger,
                free,
            } => {
                let name = name
                    .clone()
                    .unwrap_or_else(|| format!("free {free} with {trigger}"));

                Ok(Box::new(FreeBundleRule::from_catalog(
                    name, catalog, trigger, free,
                )?))
            }
        }
    }
}

/// The store's standard rules in application order: Apple TV 3 for 2, the
/// tablet bulk discount, then the free VGA adapter bundle.
///
/// # Errors
///
/// - [`RuleError::CurrencyMismatch`]: the catalog isn't priced in USD, the
///   currency of the bulk discount price.
/// - [`RuleError::UnknownSku`]: the catalog doesn't stock the Macbook Pro and
///   VGA adapter.
pub fn standard_rules<'a>(catalog: &Catalog<'a>) -> Result<Vec<BoxedRule<'a>>, RuleError> {
    let bulk_discount = bulk_discount_on_ipad();

    ensure_priced_in(catalog, bulk_discount.price().currency())?;

    Ok(vec![
        Box::new(apple_tv_deal()),
        Box::new(bulk_discount),
        Box::new(free_vga_on_macbook_pro(catalog)?),
    ])
}

fn ensure_priced_in(catalog: &Catalog<'_>, currency: &Currency) -> Result<(), RuleError> {
    if currency == catalog.currency() {
        Ok(())
    } else {
        Err(RuleError::CurrencyMismatch(
            catalog.currency().iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}

fn ensure_stocked(catalog: &Catalog<'_>, sku: &str) -> Result<(), RuleError> {
    if catalog.contains(sku) {
        Ok(())
    } else {
        Err(RuleError::UnknownSku(sku.to_string()))
    }
}

/// Returns a copy of `items` where the first `limit` items with the given SKU
/// are replaced by `discount(item)`.
pub(crate) fn discount_first<'a>(
    items: &[Item<'a>],
    sku: &str,
    limit: usize,
    discount: impl Fn(&Item<'a>) -> Item<'a>,
) -> Vec<Item<'a>> {
    let mut remaining = limit;

    items
        .iter()
        .map(|item| {
            if remaining > 0 && item.is_sku(sku) {
                remaining -= 1;
                discount(item)
            } else {
                item.clone()
            }
        })
        .collect()
}
