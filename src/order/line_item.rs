//! Line items

use crate::{
    catalog::CatalogEntry,
    money::{self, Amount},
};

/// One product entry within an order.
///
/// A line starts empty and is populated when a catalog entry is chosen. Its
/// total is derived from the unit price and quantity and is never set directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItem {
    product: Option<CatalogEntry>,
    quantity: Option<u32>,
    total: Option<Amount>,
}

impl LineItem {
    /// Create an empty line with no product chosen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a product, resetting the quantity to 1.
    pub(crate) fn select(&mut self, entry: CatalogEntry) {
        self.product = Some(entry);
        self.quantity = Some(1);
        self.recalculate();
    }

    pub(crate) fn set_quantity(&mut self, quantity: Option<u32>) {
        self.quantity = quantity;
        self.recalculate();
    }

    /// Line total is undefined unless a product is chosen and the quantity is positive.
    fn recalculate(&mut self) {
        self.total = match (self.unit_price(), self.quantity) {
            (Some(price), Some(quantity)) if quantity > 0 => money::times(price, quantity),
            _ => None,
        };
    }

    /// The chosen catalog entry, if any.
    pub fn product(&self) -> Option<&CatalogEntry> {
        self.product.as_ref()
    }

    /// Product code
    pub fn code(&self) -> Option<&str> {
        self.product.as_ref().map(|entry| entry.code.as_str())
    }

    /// Product display name
    pub fn name(&self) -> Option<&str> {
        self.product.as_ref().map(|entry| entry.name.as_str())
    }

    /// Unit price
    pub fn unit_price(&self) -> Option<Amount> {
        self.product.as_ref().map(|entry| entry.price)
    }

    /// Quantity as entered
    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    /// Line total, `None` when undefined.
    pub fn total(&self) -> Option<Amount> {
        self.total
    }
}

/// Parse a quantity typed into the till.
///
/// Returns `None` for empty, negative or non-numeric input.
pub fn parse_quantity(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};

    use super::*;

    fn bagel() -> CatalogEntry {
        CatalogEntry::new("B", "Bagel", Money::from_minor(150, USD))
    }

    #[test]
    fn new_line_is_empty() {
        let line = LineItem::new();

        assert_eq!(line.code(), None);
        assert_eq!(line.quantity(), None);
        assert_eq!(line.total(), None);
    }

    #[test]
    fn select_sets_quantity_to_one() {
        let mut line = LineItem::new();

        line.select(bagel());

        assert_eq!(line.name(), Some("Bagel"));
        assert_eq!(line.quantity(), Some(1));
        assert_eq!(line.total(), Some(Money::from_minor(150, USD)));
    }

    #[test]
    fn reselect_resets_quantity() {
        let mut line = LineItem::new();

        line.select(bagel());
        line.set_quantity(Some(4));
        line.select(CatalogEntry::new("A", "Apple", Money::from_minor(40, USD)));

        assert_eq!(line.quantity(), Some(1));
        assert_eq!(line.total(), Some(Money::from_minor(40, USD)));
    }

    #[test]
    fn zero_or_missing_quantity_clears_total() {
        let mut line = LineItem::new();

        line.select(bagel());
        line.set_quantity(Some(0));

        assert_eq!(line.total(), None);

        line.set_quantity(None);

        assert_eq!(line.total(), None);
    }

    #[test]
    fn quantity_without_product_has_no_total() {
        let mut line = LineItem::new();

        line.set_quantity(Some(3));

        assert_eq!(line.quantity(), Some(3));
        assert_eq!(line.total(), None);
    }

    #[test]
    fn parse_quantity_rejects_non_numbers() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity(" 12 "), Some(12));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("-1"), None);
        assert_eq!(parse_quantity("two"), None);
        assert_eq!(parse_quantity("1.5"), None);
    }
}
