//! Rule Pipeline
//!
//! Left-to-right composition of pricing rules. Each rule receives the full
//! output of the rule before it; an empty pipeline is the identity.

use std::fmt;

use crate::{
    catalog::Catalog,
    items::Item,
    rules::{BoxedRule, PricingRule, RuleError, standard_rules},
};

/// An ordered list of pricing rules
#[derive(Default)]
pub struct Pipeline<'a> {
    rules: Vec<BoxedRule<'a>>,
}

impl<'a> Pipeline<'a> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The store's standard rules: Apple TV 3 for 2, the bulk discount on tablets,
    /// then a free VGA adapter with every Macbook Pro.
    ///
    /// The bundle rule runs last so the adapters it adds aren't re-counted by
    /// any other rule.
    ///
    /// # Errors
    ///
    /// See [`standard_rules`]: the catalog must be priced in USD and stock the
    /// Macbook Pro and VGA adapter.
    pub fn standard(catalog: &Catalog<'a>) -> Result<Self, RuleError> {
        Ok(standard_rules(catalog)?.into_iter().collect())
    }

    /// Append a rule, builder style.
    #[must_use]
    pub fn with_rule(mut self, rule: impl PricingRule<'a> + 'a) -> Self {
        self.push(rule);
        self
    }

    /// Append a rule to the end of the pipeline.
    pub fn push(&mut self, rule: impl PricingRule<'a> + 'a) {
        self.rules.push(Box::new(rule));
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the pipeline has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in application order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Run every rule in order over the item list.
    pub fn apply(&self, items: &[Item<'a>]) -> Vec<Item<'a>> {
        let mut current = items.to_vec();

        for rule in &self.rules {
            current = rule.apply(&current);

            tracing::debug!(
                rule = rule.name(),
                items = current.len(),
                discounted = current.iter().filter(|item| item.is_discounted()).count(),
                "applied pricing rule"
            );
        }

        current
    }
}

impl<'a> FromIterator<BoxedRule<'a>> for Pipeline<'a> {
    fn from_iter<I: IntoIterator<Item = BoxedRule<'a>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("rules", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        catalog::{APPLE_TV, IPAD, MACBOOK_PRO, VGA_ADAPTER},
        items::count_sku,
        rules::{
            apple_tv_deal, bulk_discount_on_ipad, free_vga_on_macbook_pro, test_support::items,
        },
    };

    use super::*;

    fn price_all<'a>(minor: i64) -> impl Fn(&[Item<'a>]) -> Vec<Item<'a>> {
        move |items: &[Item<'a>]| {
            items
                .iter()
                .map(|item| item.with_discounted_price(Money::from_minor(minor, USD)))
                .collect()
        }
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(APPLE_TV, 3), (IPAD, 5)]);

        let pipeline = Pipeline::new();

        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(&scanned), scanned);
    }

    #[test]
    fn rules_apply_left_to_right() {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(IPAD, 2)]);

        let pipeline = Pipeline::new().with_rule(price_all(100)).with_rule(price_all(200));

        let priced = pipeline.apply(&scanned);

        assert!(
            priced
                .iter()
                .all(|item| item.price() == &Money::from_minor(200, USD))
        );
    }

    #[test]
    fn each_rule_sees_the_previous_output() -> TestResult {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(MACBOOK_PRO, 2)]);

        // The bundle rule appends two adapters; the closure after it must see them.
        let pipeline = Pipeline::new()
            .with_rule(free_vga_on_macbook_pro(&catalog)?)
            .with_rule(price_all(1));

        let priced = pipeline.apply(&scanned);

        assert_eq!(count_sku(&priced, VGA_ADAPTER), 2);
        assert!(
            priced
                .iter()
                .all(|item| item.price() == &Money::from_minor(1, USD))
        );

        Ok(())
    }

    #[test]
    fn standard_pipeline_orders_rules() -> TestResult {
        let catalog = Catalog::standard();
        let pipeline = Pipeline::standard(&catalog)?;

        let names: Vec<&str> = pipeline.names().collect();

        assert_eq!(
            names,
            [
                "Apple TV 3 for 2",
                "Super iPad bulk discount",
                "Free VGA adapter with Macbook Pro",
            ]
        );

        Ok(())
    }

    #[test]
    fn pipeline_collects_from_boxed_rules() {
        let rules: Vec<BoxedRule<'static>> = vec![
            Box::new(apple_tv_deal()),
            Box::new(bulk_discount_on_ipad()),
        ];

        let pipeline: Pipeline<'static> = rules.into_iter().collect();

        assert_eq!(pipeline.len(), 2);
        assert!(format!("{pipeline:?}").contains("Apple TV 3 for 2"));
    }

    #[test]
    fn apply_does_not_mutate_input() -> TestResult {
        let catalog = Catalog::standard();
        let scanned = items(&catalog, &[(APPLE_TV, 3), (MACBOOK_PRO, 1)]);
        let before = scanned.clone();

        let _priced = Pipeline::standard(&catalog)?.apply(&scanned);

        assert_eq!(scanned, before);

        Ok(())
    }
}
