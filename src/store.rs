//! Store
//!
//! Reference data for a till: the currency, the product catalog and the
//! cashier roster. Loaded from a YAML store file, or from the built-in store.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogEntry, CatalogError},
    money::{self, PriceError},
    roster::{CashierEntry, Roster, RosterError},
};

/// The store file compiled into the binary.
const BUILTIN_STORE: &str = include_str!("../fixtures/store.yml");

/// Store loading errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading the store file
    #[error("Failed to read store file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or currency
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Invalid product catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid cashier roster
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Wrapper for a store in YAML
#[derive(Debug, Deserialize)]
struct StoreFixture {
    currency: String,

    #[serde(default)]
    products: Vec<ProductFixture>,

    #[serde(default)]
    cashiers: Vec<CashierFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
struct ProductFixture {
    code: String,
    name: String,

    /// Unit price (e.g., "10000 IDR")
    price: String,
}

/// Cashier Fixture
#[derive(Debug, Deserialize)]
struct CashierFixture {
    code: String,
    name: String,
}

impl TryFrom<ProductFixture> for CatalogEntry {
    type Error = PriceError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = money::parse_price(&fixture.price)?;

        Ok(CatalogEntry::new(fixture.code, fixture.name, price))
    }
}

impl From<CashierFixture> for CashierEntry {
    fn from(fixture: CashierFixture) -> Self {
        CashierEntry::new(fixture.code, fixture.name)
    }
}

/// Store reference data
#[derive(Debug, Clone)]
pub struct Store {
    catalog: Catalog,
    roster: Roster,
}

impl Store {
    /// Create a store from an existing catalog and roster.
    pub fn new(catalog: Catalog, roster: Roster) -> Self {
        Self { catalog, roster }
    }

    /// Load the built-in store.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in store file is invalid.
    pub fn builtin() -> Result<Self, StoreError> {
        Self::from_yaml_str(BUILTIN_STORE)
    }

    /// Load a store from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// catalog or roster it describes is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "loading store file");

        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Load a store from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed, or if the catalog or
    /// roster it describes is invalid.
    pub fn from_yaml_str(contents: &str) -> Result<Self, StoreError> {
        let fixture: StoreFixture = serde_norway::from_str(contents)?;

        let currency = money::currency(&fixture.currency)?;

        let entries = fixture
            .products
            .into_iter()
            .map(CatalogEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = Catalog::new(entries, currency)?;
        let roster = Roster::new(
            fixture
                .cashiers
                .into_iter()
                .map(CashierEntry::from)
                .collect::<Vec<_>>(),
        )?;

        debug!(
            currency = currency.iso_alpha_code,
            products = catalog.len(),
            cashiers = roster.len(),
            "store loaded"
        );

        Ok(Self { catalog, roster })
    }

    /// Product catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cashier roster
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}
