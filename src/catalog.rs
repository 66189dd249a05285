//! Catalog
//!
//! The fixed list of products a cashier can choose from. Line items can only
//! be populated from entries in this list.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::money::Amount;

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two entries share the same product code.
    #[error("Duplicate product code: {0}")]
    DuplicateCode(String),

    /// A product code or name was left blank.
    #[error("Product at position {0} is missing a code or name")]
    MissingField(usize),

    /// A product is priced below zero.
    #[error("Product {0} has a negative price")]
    NegativePrice(String),

    /// A product's currency differs from the catalog currency.
    ///
    /// Carries the product code, the product currency and the catalog currency.
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Product code
    pub code: String,

    /// Product display name
    pub name: String,

    /// Unit price
    pub price: Amount,
}

impl CatalogEntry {
    /// Create a new catalog entry.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Amount) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
        }
    }
}

/// Product catalog, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: FxHashMap<String, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create a catalog from the given entries.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if a code is duplicated, a field is blank,
    /// a price is negative, or an entry is priced in another currency.
    pub fn new(
        entries: impl Into<Vec<CatalogEntry>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let entries = entries.into();
        let mut index = FxHashMap::default();

        for (position, entry) in entries.iter().enumerate() {
            if entry.code.trim().is_empty() || entry.name.trim().is_empty() {
                return Err(CatalogError::MissingField(position));
            }

            let entry_currency = entry.price.currency();

            if entry_currency != currency {
                return Err(CatalogError::CurrencyMismatch(
                    entry.code.clone(),
                    entry_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if entry.price.to_minor_units() < 0 {
                return Err(CatalogError::NegativePrice(entry.code.clone()));
            }

            if index.insert(entry.code.clone(), position).is_some() {
                return Err(CatalogError::DuplicateCode(entry.code.clone()));
            }
        }

        Ok(Self {
            entries,
            index,
            currency,
        })
    }

    /// Look up a product by code.
    pub fn get(&self, code: &str) -> Option<&CatalogEntry> {
        self.index
            .get(code)
            .and_then(|&position| self.entries.get(position))
    }

    /// Iterate over the products in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currency every product is priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{IDR, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn entries() -> [CatalogEntry; 2] {
        [
            CatalogEntry::new("P001", "Kopi Susu", Money::from_minor(1_800_000, IDR)),
            CatalogEntry::new("P002", "Teh Manis", Money::from_minor(800_000, IDR)),
        ]
    }

    #[test]
    fn get_finds_entry_by_code() -> TestResult {
        let catalog = Catalog::new(entries(), IDR)?;

        let entry = catalog.get("P002").ok_or("missing entry")?;

        assert_eq!(entry.name, "Teh Manis");
        assert_eq!(entry.price, Money::from_minor(800_000, IDR));

        Ok(())
    }

    #[test]
    fn get_unknown_code_is_none() -> TestResult {
        let catalog = Catalog::new(entries(), IDR)?;

        assert!(catalog.get("P999").is_none());

        Ok(())
    }

    #[test]
    fn iter_keeps_display_order() -> TestResult {
        let catalog = Catalog::new(entries(), IDR)?;

        let codes: Vec<&str> = catalog.iter().map(|entry| entry.code.as_str()).collect();

        assert_eq!(codes, vec!["P001", "P002"]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_code_errors() {
        let [first, _] = entries();

        let result = Catalog::new(vec![first.clone(), first], IDR);

        assert_eq!(result.err(), Some(CatalogError::DuplicateCode("P001".to_string())));
    }

    #[test]
    fn negative_price_errors() {
        let entry = CatalogEntry::new("P003", "Refund", Money::from_minor(-100, IDR));

        let result = Catalog::new(vec![entry], IDR);

        assert_eq!(result.err(), Some(CatalogError::NegativePrice("P003".to_string())));
    }

    #[test]
    fn blank_name_errors() {
        let entry = CatalogEntry::new("P003", "  ", Money::from_minor(100, IDR));

        let result = Catalog::new(vec![entry], IDR);

        assert_eq!(result.err(), Some(CatalogError::MissingField(0)));
    }

    #[test]
    fn currency_mismatch_errors() {
        let entry = CatalogEntry::new("P003", "Bagel", Money::from_minor(100, USD));

        let result = Catalog::new(vec![entry], IDR);

        match result {
            Err(CatalogError::CurrencyMismatch(code, entry_currency, catalog_currency)) => {
                assert_eq!(code, "P003");
                assert_eq!(entry_currency, USD.iso_alpha_code);
                assert_eq!(catalog_currency, IDR.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }
}
