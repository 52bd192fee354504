//! Checkout
//!
//! A point-of-sale checkout pricing engine. Scanned products are run through an
//! ordered pipeline of pricing rules (multi-buy, bulk discount, free bundle)
//! and summed into a total.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod items;
pub mod pipeline;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod rules;
