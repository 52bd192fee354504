//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    checkout::Checkout,
    config::{CheckoutConfig, ConfigError},
    items::Item,
    pipeline::Pipeline,
    pricing::TotalPriceError,
    products::{Product, ProductKey},
    receipt::{Receipt, ReceiptError},
    rules::{
        BoxedRule, BulkDiscountRule, FreeBundleRule, MultiBuyRule, PricingRule, RuleConfig,
        RuleError, apple_tv_deal, bulk_discount_on_ipad, free_vga_on_macbook_pro, standard_rules,
    },
};
