//! Receipt

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    items::Item,
    pricing::{TotalPriceError, base_price, total_price},
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating totals from the priced items.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Writing the receipt failed.
    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Final receipt for a checkout.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Priced lines, synthetic bundle items last
    lines: Vec<Item<'a>>,

    /// Indexes of lines charged at full price
    full_price_lines: SmallVec<[usize; 10]>,

    /// Total cost at catalog prices
    subtotal: Money<'a, Currency>,

    /// Total amount paid after pricing rules
    total: Money<'a, Currency>,

    /// Currency used for all monetary values
    currency: &'a Currency,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from priced items.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if any line is priced in a different currency.
    pub fn from_items(lines: Vec<Item<'a>>, currency: &'a Currency) -> Result<Self, ReceiptError> {
        let subtotal = base_price(&lines, currency)?;
        let total = total_price(&lines, currency)?;

        let full_price_lines = lines
            .iter()
            .enumerate()
            .filter(|(_, item)| item.price() == item.base_price())
            .map(|(idx, _)| idx)
            .collect();

        Ok(Self {
            lines,
            full_price_lines,
            subtotal,
            total,
            currency,
        })
    }

    /// Priced lines
    pub fn lines(&self) -> &[Item<'a>] {
        &self.lines
    }

    /// Indexes of lines charged at full price
    pub fn full_price_lines(&self) -> &[usize] {
        &self.full_price_lines
    }

    /// Total cost at catalog prices, including any free bundled items
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Total amount paid
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Currency of the receipt
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Calculate the savings made by applying pricing rules.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Writes the receipt as a table followed by a totals summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "SKU", "Item", "Base Price", "Charged", "Savings"]);

        for (idx, item) in self.lines.iter().enumerate() {
            let savings = item.base_price().sub(*item.price())?;

            builder.push_record([
                format!("#{:<3}", idx + 1),
                item.sku().to_string(),
                item.product().name.clone(),
                format!("{}", item.base_price()),
                format!("{}", item.price()),
                if savings.to_minor_units() == 0 {
                    String::new()
                } else {
                    format!("{savings}")
                },
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Subtotal: {}", self.subtotal)?;
        writeln!(out, " Savings:  {}", self.savings()?)?;
        writeln!(out, " Total:    {}", self.total)?;

        Ok(())
    }
}
