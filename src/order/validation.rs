//! Field-level validation run before an order can be finalized.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use super::{MAX_LINE_ITEMS, MIN_PRICE_MINOR, MIN_QUANTITY, Order};

/// A single field that blocks finalization.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    /// No cashier was selected.
    #[error("cashier is required")]
    MissingCashier,

    /// The order holds fewer than one or more than the maximum number of lines.
    #[error("order must have between 1 and {} line items, has {}", MAX_LINE_ITEMS, .0)]
    LineCount(usize),

    /// A line has no product selected (line index).
    #[error("line {}: product is required", .0 + 1)]
    MissingProduct(usize),

    /// A line's quantity is missing or below the minimum (line index).
    #[error("line {}: quantity must be at least {}", .0 + 1, MIN_QUANTITY)]
    QuantityBelowMinimum(usize),

    /// The grand total could not be calculated.
    #[error("grand total is undefined")]
    UndefinedTotal,

    /// A line's unit price is below the minimum (line index).
    #[error("line {}: price must be at least {} minor unit", .0 + 1, MIN_PRICE_MINOR)]
    PriceBelowMinimum(usize),
}

/// Every field that blocks finalization, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(SmallVec<[FieldError; 4]>);

impl FieldErrors {
    /// Check if there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Check if a specific error is present.
    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<FieldError> for FieldErrors {
    fn from(error: FieldError) -> Self {
        let mut errors = SmallVec::new();
        errors.push(error);

        Self(errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{error}")?;
        }

        Ok(())
    }
}

pub(super) fn validate(order: &Order<'_>) -> FieldErrors {
    let mut errors = SmallVec::new();

    if order.cashier().is_none() {
        errors.push(FieldError::MissingCashier);
    }

    let line_count = order.lines().len();

    if !(1..=MAX_LINE_ITEMS).contains(&line_count) {
        errors.push(FieldError::LineCount(line_count));
    }

    let mut lines_ok = true;

    for (idx, line) in order.lines().iter().enumerate() {
        let Some(price) = line.unit_price() else {
            errors.push(FieldError::MissingProduct(idx));
            lines_ok = false;

            continue;
        };

        if price.to_minor_units() < MIN_PRICE_MINOR {
            errors.push(FieldError::PriceBelowMinimum(idx));
            lines_ok = false;
        }

        if line.quantity().is_none_or(|quantity| quantity < MIN_QUANTITY) {
            errors.push(FieldError::QuantityBelowMinimum(idx));
            lines_ok = false;
        }
    }

    if lines_ok && order.grand_total().is_none() {
        errors.push(FieldError::UndefinedTotal);
    }

    FieldErrors(errors)
}
