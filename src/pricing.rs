//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::Item;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total charged price of a list of items.
///
/// Each line contributes its discounted price when it has one, otherwise its base price.
///
/// # Errors
///
/// - [`TotalPriceError::Money`]: an item is priced in a currency other than `currency`.
pub fn total_price<'a>(
    items: &[Item<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    sum(items.iter().map(Item::price).copied(), currency)
}

/// Calculates the total base price of a list of items, ignoring any discounts.
///
/// # Errors
///
/// - [`TotalPriceError::Money`]: an item is priced in a currency other than `currency`.
pub fn base_price<'a>(
    items: &[Item<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    sum(items.iter().map(Item::base_price).copied(), currency)
}

fn sum<'a>(
    mut prices: impl Iterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let total = prices.try_fold(Money::from_minor(0, currency), |acc, price| acc.add(price))?;

    Ok(total)
}
