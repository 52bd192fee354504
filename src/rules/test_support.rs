use crate::{catalog::Catalog, items::Item};

/// Build a scan list from `(sku, quantity)` pairs, skipping unstocked SKUs.
pub(crate) fn items<'a>(catalog: &Catalog<'a>, counts: &[(&str, usize)]) -> Vec<Item<'a>> {
    counts
        .iter()
        .flat_map(|(sku, n)| {
            catalog
                .lookup(sku)
                .cloned()
                .into_iter()
                .flat_map(move |product| std::iter::repeat_n(Item::new(product), *n))
        })
        .collect()
}
