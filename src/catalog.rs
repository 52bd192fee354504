//! Catalog
//!
//! Read-only reference data mapping SKUs to products.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, USD},
};
use serde::Deserialize;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    prices::{PriceError, parse_price},
    products::{Product, ProductKey},
};

/// Tablet SKU (`Super iPad`)
pub const IPAD: &str = "ipd";

/// Macbook Pro SKU
pub const MACBOOK_PRO: &str = "mbp";

/// Apple TV SKU
pub const APPLE_TV: &str = "atv";

/// VGA adapter SKU
pub const VGA_ADAPTER: &str = "vga";

const STANDARD_PRODUCTS: [(&str, &str, i64); 4] = [
    (IPAD, "Super iPad", 54999),
    (MACBOOK_PRO, "Macbook Pro", 139_999),
    (APPLE_TV, "Apple TV", 10950),
    (VGA_ADAPTER, "VGA adapter", 3000),
];

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid product price
    #[error(transparent)]
    Price(#[from] PriceError),

    /// A product is priced in a different currency to the rest of the catalog (SKU, expected, found)
    #[error("Product {0} has currency {2}, but catalog has currency {1}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// The catalog file defined no products, so its currency is unknown
    #[error("Catalog has no products; currency unknown")]
    Empty,
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixture {
    /// Stock-keeping unit
    pub sku: String,

    /// Product name
    pub name: String,

    /// Price in `AMOUNT CURRENCY` form, e.g. `549.99 USD`
    pub price: String,
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = PriceError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product::new(
            fixture.sku,
            fixture.name,
            Money::from_minor(minor_units, currency),
        ))
    }
}

/// Product catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
    skus: FxHashMap<String, ProductKey>,
    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            skus: FxHashMap::default(),
            currency,
        }
    }

    /// Add a product to the catalog.
    ///
    /// Returns `false` and leaves the catalog unchanged if the SKU is already
    /// present, so the first product registered for a SKU always wins.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CurrencyMismatch`] if the product is priced in
    /// a different currency to the catalog.
    pub fn insert(&mut self, product: Product<'a>) -> Result<bool, CatalogError> {
        let product_currency = product.price.currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                product.sku,
                self.currency.iso_alpha_code,
                product_currency.iso_alpha_code,
            ));
        }

        Ok(self.push(product))
    }

    fn push(&mut self, product: Product<'a>) -> bool {
        if self.skus.contains_key(&product.sku) {
            return false;
        }

        let sku = product.sku.clone();
        let key = self.products.insert(product);

        self.skus.insert(sku, key);

        true
    }

    /// Look up a product by exact SKU.
    pub fn lookup(&self, sku: &str) -> Option<&Product<'a>> {
        let key = self.skus.get(sku)?;

        self.products.get(*key)
    }

    /// Returns true if the catalog has a product with the given SKU.
    pub fn contains(&self, sku: &str) -> bool {
        self.skus.contains_key(sku)
    }

    /// Iterate over products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product<'a>> {
        self.products.values()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency all catalog prices are in.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}

impl Catalog<'static> {
    /// The store's fixed four-product catalog, priced in USD.
    pub fn standard() -> Self {
        let mut catalog = Catalog::new(USD);

        for (sku, name, minor_units) in STANDARD_PRODUCTS {
            catalog.push(Product::new(sku, name, Money::from_minor(minor_units, USD)));
        }

        catalog
    }

    /// Build a catalog from product fixtures.
    ///
    /// The first product fixes the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed, currencies are mixed, or
    /// no products are given.
    pub fn from_fixtures(
        fixtures: impl IntoIterator<Item = ProductFixture>,
    ) -> Result<Self, CatalogError> {
        let mut catalog: Option<Catalog<'static>> = None;

        for fixture in fixtures {
            let product = Product::try_from(fixture)?;

            let target = catalog.get_or_insert_with(|| Catalog::new(product.price.currency()));
            let sku = product.sku.clone();

            if !target.insert(product)? {
                tracing::debug!(%sku, "ignoring duplicate SKU in catalog fixture");
            }
        }

        catalog.ok_or(CatalogError::Empty)
    }

    /// Parse a catalog from a YAML document with a `products` list.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or [`Catalog::from_fixtures`] fails.
    pub fn from_yaml_str(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        Self::from_fixtures(fixture.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Self::standard()
    }
}
