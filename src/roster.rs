//! Cashier roster

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors related to roster construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    /// Two cashiers share the same code.
    #[error("Duplicate cashier code: {0}")]
    DuplicateCode(String),

    /// A cashier code or name was left blank.
    #[error("Cashier at position {0} is missing a code or name")]
    MissingField(usize),
}

/// A cashier who can ring up an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashierEntry {
    /// Cashier code
    pub code: String,

    /// Cashier display name
    pub name: String,
}

impl CashierEntry {
    /// Create a new cashier entry.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Cashier roster, in display order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    cashiers: Vec<CashierEntry>,
    index: FxHashMap<String, usize>,
}

impl Roster {
    /// Create a roster from the given cashiers.
    ///
    /// # Errors
    ///
    /// Returns a [`RosterError`] if a code is duplicated or a field is blank.
    pub fn new(cashiers: impl Into<Vec<CashierEntry>>) -> Result<Self, RosterError> {
        let cashiers = cashiers.into();
        let mut index = FxHashMap::default();

        for (position, cashier) in cashiers.iter().enumerate() {
            if cashier.code.trim().is_empty() || cashier.name.trim().is_empty() {
                return Err(RosterError::MissingField(position));
            }

            if index.insert(cashier.code.clone(), position).is_some() {
                return Err(RosterError::DuplicateCode(cashier.code.clone()));
            }
        }

        Ok(Self { cashiers, index })
    }

    /// Look up a cashier by code.
    pub fn get(&self, code: &str) -> Option<&CashierEntry> {
        self.index
            .get(code)
            .and_then(|&position| self.cashiers.get(position))
    }

    /// Iterate over the cashiers in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CashierEntry> {
        self.cashiers.iter()
    }

    /// Number of cashiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cashiers.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cashiers.is_empty()
    }
}
