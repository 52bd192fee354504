//! Configuration
//!
//! A store configuration is a YAML document listing the catalog products and
//! the ordered pricing rules:
//!
//! ```yaml
//! products:
//!   - { sku: atv, name: Apple TV, price: 109.50 USD }
//! rules:
//!   - { type: multi_buy, sku: atv, buy: 3, pay: 2 }
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, ProductFixture},
    checkout::Checkout,
    pipeline::Pipeline,
    rules::{RuleConfig, RuleError},
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid pricing rule (rule position, error)
    #[error("Invalid pricing rule #{0}: {1}")]
    Rule(usize, RuleError),
}

/// Store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// Catalog products
    pub products: Vec<ProductFixture>,

    /// Pricing rules in application order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl CheckoutConfig {
    /// Parse a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        tracing::debug!(path = %path.display(), "loading checkout config");

        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Build the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the products are invalid.
    pub fn catalog(&self) -> Result<Catalog<'static>, CatalogError> {
        Catalog::from_fixtures(self.products.iter().cloned())
    }

    /// Build the configured pricing rules against a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rule`] naming the first invalid rule.
    pub fn pipeline<'a>(&self, catalog: &Catalog<'a>) -> Result<Pipeline<'a>, ConfigError> {
        self.rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| {
                rule.build(catalog)
                    .map_err(|err| ConfigError::Rule(idx + 1, err))
            })
            .collect()
    }

    /// Build a checkout from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or any rule is invalid.
    pub fn checkout(&self) -> Result<Checkout<'static>, ConfigError> {
        Checkout::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::{
        Money,
        iso::{EUR, USD},
    };
    use testresult::TestResult;

    use super::*;

    const CAFE: &str = "
products:
  - { sku: cof, name: Coffee, price: 2.50 EUR }
  - { sku: cup, name: Cup, price: 0.50 EUR }
rules:
  - { type: multi_buy, name: Coffee 2 for 1, sku: cof, buy: 2, pay: 1 }
  - { type: free_bundle, trigger: cof, free: cup }
";

    #[test]
    fn from_yaml_str_builds_working_checkout() -> TestResult {
        let config = CheckoutConfig::from_yaml_str(CAFE)?;
        let mut checkout = config.checkout()?;

        checkout.scan("cof");
        checkout.scan("cof");

        let names: Vec<&str> = checkout.pipeline().names().collect();

        assert_eq!(names, ["Coffee 2 for 1", "free cup with cof"]);
        assert_eq!(checkout.catalog().currency(), EUR);
        assert_eq!(checkout.total()?, Money::from_minor(250, EUR));
        assert_eq!(checkout.priced_items().len(), 4);

        Ok(())
    }

    #[test]
    fn rules_default_to_none() -> TestResult {
        let config =
            CheckoutConfig::from_yaml_str("products:\n  - { sku: a, name: A, price: 1 USD }\n")?;

        let checkout = config.checkout()?;

        assert!(checkout.pipeline().is_empty());
        assert_eq!(checkout.catalog().currency(), USD);

        Ok(())
    }

    #[test]
    fn pipeline_reports_position_of_bad_rule() -> TestResult {
        let config = CheckoutConfig::from_yaml_str(
            "products:\n  - { sku: a, name: A, price: 1 USD }\nrules:\n  - { type: multi_buy, sku: a, buy: 2, pay: 1 }\n  - { type: free_bundle, trigger: a, free: b }\n",
        )?;

        let result = config.checkout();

        assert!(matches!(
            result,
            Err(ConfigError::Rule(2, RuleError::UnknownSku(sku))) if sku == "b"
        ));

        Ok(())
    }

    #[test]
    fn invalid_catalog_is_reported() -> TestResult {
        let config = CheckoutConfig::from_yaml_str("products: []\n")?;

        assert!(matches!(
            config.checkout(),
            Err(ConfigError::Catalog(CatalogError::Empty))
        ));

        Ok(())
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cafe.yml");

        fs::write(&path, CAFE)?;

        let config = CheckoutConfig::load(&path)?;

        assert_eq!(config.products.len(), 2);
        assert_eq!(config.rules.len(), 2);

        Ok(())
    }

    #[test]
    fn load_rejects_invalid_yaml() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.yml");

        fs::write(&path, "products: {")?;

        assert!(matches!(
            CheckoutConfig::load(&path),
            Err(ConfigError::Yaml(_))
        ));

        Ok(())
    }
}
