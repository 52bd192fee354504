//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use thiserror::Error;

/// Errors raised while parsing price strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The price string was not in `AMOUNT CURRENCY` form, or the amount was not a number.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// The currency code is not one the store trades in.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Parse a price string (e.g. `"549.99 USD"`) into minor units and a currency.
///
/// # Errors
///
/// - [`PriceError::InvalidPrice`]: the string is malformed, the amount has more
///   decimal places than the currency's minor unit, or it does not fit in minor units.
/// - [`PriceError::UnknownCurrency`]: the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), PriceError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(PriceError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(PriceError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidPrice(s.to_string()))?
        .normalize();

    // Fractions of the minor unit are rejected rather than rounded.
    if amount.scale() > currency.exponent {
        return Err(PriceError::InvalidPrice(format!(
            "More than {} decimal places for {}: {s}",
            currency.exponent, currency.iso_alpha_code
        )));
    }

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| PriceError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse a price string straight into [`Money`].
///
/// # Errors
///
/// See [`parse_price`].
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, PriceError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}
