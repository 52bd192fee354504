//! Items

use rusty_money::{Money, iso::Currency};

use crate::products::Product;

/// A scanned line item.
///
/// Items start out at full price; pricing rules replace them with
/// [`Item::Discounted`] values carrying the price actually charged.
#[derive(Clone, Debug, PartialEq)]
pub enum Item<'a> {
    /// Charged at the product's base price
    FullPrice(Product<'a>),

    /// Charged at a rule-assigned price, zero meaning free
    Discounted {
        /// Product being sold
        product: Product<'a>,

        /// Price charged for this line
        price: Money<'a, Currency>,
    },
}

impl<'a> Item<'a> {
    /// Creates a new full price item for the given product
    pub fn new(product: Product<'a>) -> Self {
        Item::FullPrice(product)
    }

    /// Returns the product on this line
    pub fn product(&self) -> &Product<'a> {
        match self {
            Item::FullPrice(product) | Item::Discounted { product, .. } => product,
        }
    }

    /// Returns the product SKU
    pub fn sku(&self) -> &str {
        &self.product().sku
    }

    /// Returns true if this line is for the given SKU
    pub fn is_sku(&self, sku: &str) -> bool {
        self.sku() == sku
    }

    /// Returns the catalog price of the product
    pub fn base_price(&self) -> &Money<'a, Currency> {
        &self.product().price
    }

    /// Returns the discounted price, if a rule assigned one
    pub fn discounted_price(&self) -> Option<&Money<'a, Currency>> {
        match self {
            Item::FullPrice(_) => None,
            Item::Discounted { price, .. } => Some(price),
        }
    }

    /// Returns true if a rule assigned a discounted price
    pub fn is_discounted(&self) -> bool {
        matches!(self, Item::Discounted { .. })
    }

    /// Returns the price charged for this line.
    ///
    /// A negative discounted price is ignored and the base price charged instead.
    pub fn price(&self) -> &Money<'a, Currency> {
        match self.discounted_price() {
            Some(price) if price.to_minor_units() >= 0 => price,
            _ => self.base_price(),
        }
    }

    /// Returns a copy of this item charged at the given price
    #[must_use]
    pub fn with_discounted_price(&self, price: Money<'a, Currency>) -> Self {
        Item::Discounted {
            product: self.product().clone(),
            price,
        }
    }

    /// Returns a copy of this item charged nothing
    #[must_use]
    pub fn free(&self) -> Self {
        self.with_discounted_price(Money::from_minor(0, self.base_price().currency()))
    }
}

impl<'a> From<Product<'a>> for Item<'a> {
    fn from(product: Product<'a>) -> Self {
        Item::new(product)
    }
}

/// Counts the items in a list with the given SKU
pub fn count_sku(items: &[Item<'_>], sku: &str) -> usize {
    items.iter().filter(|item| item.is_sku(sku)).count()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    fn adapter<'a>() -> Product<'a> {
        Product::new("vga", "VGA adapter", Money::from_minor(3000, USD))
    }

    #[test]
    fn new_item_charges_base_price() {
        let item = Item::new(adapter());

        assert!(!item.is_discounted());
        assert_eq!(item.discounted_price(), None);
        assert_eq!(item.price(), &Money::from_minor(3000, USD));
    }

    #[test]
    fn discounted_item_charges_discounted_price() {
        let item = Item::new(adapter()).with_discounted_price(Money::from_minor(1000, USD));

        assert!(item.is_discounted());
        assert_eq!(item.base_price(), &Money::from_minor(3000, USD));
        assert_eq!(item.price(), &Money::from_minor(1000, USD));
    }

    #[test]
    fn free_item_charges_zero() {
        let item = Item::new(adapter()).free();

        assert_eq!(item.discounted_price(), Some(&Money::from_minor(0, USD)));
        assert_eq!(item.price(), &Money::from_minor(0, USD));
    }

    #[test]
    fn negative_discounted_price_falls_back_to_base_price() {
        let item = Item::new(adapter()).with_discounted_price(Money::from_minor(-1, USD));

        assert!(item.is_discounted());
        assert_eq!(item.price(), &Money::from_minor(3000, USD));
    }

    #[test]
    fn rediscounting_keeps_the_product() {
        let item = Item::new(adapter())
            .with_discounted_price(Money::from_minor(1000, USD))
            .free();

        assert_eq!(item.sku(), "vga");
        assert_eq!(item.price(), &Money::from_minor(0, USD));
    }

    #[test]
    fn count_sku_counts_matching_lines() {
        let ipad = Product::new("ipd", "Super iPad", Money::from_minor(54999, USD));
        let items = [
            Item::new(adapter()),
            Item::new(ipad.clone()),
            Item::new(adapter()).free(),
            Item::from(ipad),
        ];

        assert_eq!(count_sku(&items, "vga"), 2);
        assert_eq!(count_sku(&items, "ipd"), 2);
        assert_eq!(count_sku(&items, "atv"), 0);
    }
}
