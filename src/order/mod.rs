//! Orders
//!
//! An [`Order`] is the single in-memory order being rung up at the till. Every
//! edit recalculates the values derived from it before returning, so line
//! totals, grand total and change are never stale:
//!
//! - line total = unit price x quantity
//! - grand total = sum of line totals
//! - change = payment - grand total
//!
//! Any undefined input makes the derived value undefined (`None`) rather than
//! zero, and undefined values propagate upwards.

use std::fmt;

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    money::{self, Amount},
    roster::CashierEntry,
    store::Store,
    summary::{OrderSummary, SummaryLine},
};

mod line_item;
mod validation;

pub use line_item::{LineItem, parse_quantity};
pub use validation::{FieldError, FieldErrors};

/// Maximum number of line items in an order.
pub const MAX_LINE_ITEMS: usize = 10;

/// Minimum quantity for a line to count towards the total.
pub const MIN_QUANTITY: u32 = 1;

/// Minimum unit price, in minor units, for a line to be finalized.
pub const MIN_PRICE_MINOR: i64 = 1;

/// Errors returned by edits that cannot be applied to an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The product code is not in the catalog.
    #[error("Product {0} not found in catalog")]
    UnknownProduct(String),

    /// The cashier code is not in the roster.
    #[error("Cashier {0} not found in roster")]
    UnknownCashier(String),

    /// There is no line at the given index.
    #[error("Line {0} not found")]
    LineNotFound(usize),

    /// The sole remaining line cannot be removed.
    #[error("Cannot remove the only line item")]
    LastLine,

    /// The order already holds the maximum number of lines.
    #[error("Order already has {} line items", MAX_LINE_ITEMS)]
    TooManyLines,

    /// The payment is in a different currency to the store (payment currency, store currency).
    #[error("Payment has currency {0}, but store has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Errors returned when finalizing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FinalizeError {
    /// One or more fields block finalization.
    #[error("Order cannot be finalized: {0}")]
    Invalid(FieldErrors),
}

/// Order identifier, generated once per order. Displayed as `ORDER-<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a new, time-ordered order id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORDER-{}", self.0)
    }
}

/// An order being edited at the till.
#[derive(Debug, Clone)]
pub struct Order<'s> {
    id: OrderId,
    placed_at: Timestamp,
    store: &'s Store,
    cashier: Option<CashierEntry>,
    lines: SmallVec<[LineItem; MAX_LINE_ITEMS]>,
    grand_total: Option<Amount>,
    payment: Option<Amount>,
    change: Option<Amount>,
}

impl<'s> Order<'s> {
    /// Start a new order with a fresh id, the current time and one empty line.
    pub fn new(store: &'s Store) -> Self {
        Self::with_identity(store, OrderId::new(), Timestamp::now())
    }

    /// Start a new order with the given id and timestamp.
    pub fn with_identity(store: &'s Store, id: OrderId, placed_at: Timestamp) -> Self {
        let mut lines = SmallVec::new();
        lines.push(LineItem::new());

        info!(order = %id, %placed_at, "order started");

        Order {
            id,
            placed_at,
            store,
            cashier: None,
            lines,
            grand_total: None,
            payment: None,
            change: None,
        }
    }

    /// Select the cashier ringing up this order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnknownCashier`] if the code is not in the roster.
    pub fn set_cashier(&mut self, code: &str) -> Result<(), OrderError> {
        let store = self.store;

        let Some(cashier) = store.roster().get(code) else {
            warn!(order = %self.id, code, "unknown cashier rejected");

            return Err(OrderError::UnknownCashier(code.to_string()));
        };

        self.cashier = Some(cashier.clone());

        Ok(())
    }

    /// Append an empty line, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::TooManyLines`] if the order is already full.
    pub fn add_line(&mut self) -> Result<usize, OrderError> {
        if self.lines.len() >= MAX_LINE_ITEMS {
            warn!(order = %self.id, "line limit reached");

            return Err(OrderError::TooManyLines);
        }

        self.lines.push(LineItem::new());
        self.recalculate_totals();

        Ok(self.lines.len() - 1)
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::LastLine`] if it is the only line, or
    /// [`OrderError::LineNotFound`] if there is no such line.
    pub fn remove_line(&mut self, index: usize) -> Result<LineItem, OrderError> {
        if index >= self.lines.len() {
            return Err(OrderError::LineNotFound(index));
        }

        if self.lines.len() == 1 {
            warn!(order = %self.id, "refusing to remove the only line");

            return Err(OrderError::LastLine);
        }

        let removed = self.lines.remove(index);
        self.recalculate_totals();

        Ok(removed)
    }

    /// Choose a catalog product for the line at `index`.
    ///
    /// Sets the line's name and unit price from the catalog and its quantity to 1.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UnknownProduct`] if the code is not in the catalog,
    /// or [`OrderError::LineNotFound`] if there is no such line.
    pub fn select_product(&mut self, index: usize, code: &str) -> Result<(), OrderError> {
        let store = self.store;

        let Some(entry) = store.catalog().get(code) else {
            warn!(order = %self.id, code, "unknown product rejected");

            return Err(OrderError::UnknownProduct(code.to_string()));
        };

        let line = self
            .lines
            .get_mut(index)
            .ok_or(OrderError::LineNotFound(index))?;

        line.select(entry.clone());

        debug!(
            order = %self.id,
            line = index,
            code,
            total = %money::display(line.total()),
            "product selected"
        );

        self.recalculate_totals();

        Ok(())
    }

    /// Change the quantity of the line at `index`.
    ///
    /// A missing or zero quantity leaves the line total undefined.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::LineNotFound`] if there is no such line.
    pub fn set_quantity(&mut self, index: usize, quantity: Option<u32>) -> Result<(), OrderError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(OrderError::LineNotFound(index))?;

        line.set_quantity(quantity);

        debug!(
            order = %self.id,
            line = index,
            ?quantity,
            total = %money::display(line.total()),
            "line total recalculated"
        );

        self.recalculate_totals();

        Ok(())
    }

    /// Change the quantity of the line at `index` from text input.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::LineNotFound`] if there is no such line.
    pub fn enter_quantity(&mut self, index: usize, input: &str) -> Result<(), OrderError> {
        self.set_quantity(index, parse_quantity(input))
    }

    /// Set the payment amount, or clear it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::CurrencyMismatch`] if the payment is not in the store currency.
    pub fn set_payment(&mut self, payment: Option<Amount>) -> Result<(), OrderError> {
        let currency = self.currency();

        if let Some(amount) = payment {
            if amount.currency() != currency {
                return Err(OrderError::CurrencyMismatch(
                    amount.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }
        }

        self.payment = payment;
        self.recalculate_change();

        Ok(())
    }

    /// Set the payment amount from text input in the store currency.
    ///
    /// Empty or non-numeric input clears the payment.
    pub fn enter_payment(&mut self, input: &str) {
        self.payment = money::parse_amount(input, self.currency());
        self.recalculate_change();
    }

    /// Check every field that blocks finalization.
    pub fn validate(&self) -> FieldErrors {
        validation::validate(self)
    }

    /// Produce the read-only summary of this order.
    ///
    /// # Errors
    ///
    /// Returns [`FinalizeError::Invalid`] listing every field that needs correcting.
    pub fn finalize(&self) -> Result<OrderSummary, FinalizeError> {
        let errors = self.validate();

        if !errors.is_empty() {
            warn!(order = %self.id, %errors, "order not finalized");

            return Err(FinalizeError::Invalid(errors));
        }

        let (Some(cashier), Some(grand_total)) = (self.cashier.clone(), self.grand_total) else {
            return Err(FinalizeError::Invalid(FieldError::UndefinedTotal.into()));
        };

        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                SummaryLine::try_from(line).map_err(|()| FieldError::MissingProduct(idx))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| FinalizeError::Invalid(error.into()))?;

        info!(
            order = %self.id,
            grand_total = %grand_total,
            change = %money::display(self.change),
            "order finalized"
        );

        Ok(OrderSummary::new(
            self.id,
            self.placed_at,
            cashier,
            lines,
            grand_total,
            self.payment,
            self.change,
        ))
    }

    fn recalculate_totals(&mut self) {
        self.grand_total = money::sum(self.lines.iter().map(LineItem::total), self.currency());

        debug!(
            order = %self.id,
            lines = self.lines.len(),
            grand_total = %money::display(self.grand_total),
            "grand total recalculated"
        );

        self.recalculate_change();
    }

    fn recalculate_change(&mut self) {
        self.change = money::difference(self.payment, self.grand_total);

        debug!(
            order = %self.id,
            payment = %money::display(self.payment),
            change = %money::display(self.change),
            "change recalculated"
        );
    }

    /// Order identifier
    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// When the order was started
    #[must_use]
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// Store the order is rung up against
    #[must_use]
    pub fn store(&self) -> &'s Store {
        self.store
    }

    /// Currency of every amount in the order
    #[must_use]
    pub fn currency(&self) -> &'static rusty_money::iso::Currency {
        self.store.catalog().currency()
    }

    /// Selected cashier
    #[must_use]
    pub fn cashier(&self) -> Option<&CashierEntry> {
        self.cashier.as_ref()
    }

    /// Line items, in order
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Line at `index`
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.lines.get(index)
    }

    /// Sum of line totals, `None` if any line total is undefined
    #[must_use]
    pub fn grand_total(&self) -> Option<Amount> {
        self.grand_total
    }

    /// Payment amount
    #[must_use]
    pub fn payment(&self) -> Option<Amount> {
        self.payment
    }

    /// Payment minus grand total, `None` if either is undefined
    #[must_use]
    pub fn change(&self) -> Option<Amount> {
        self.change
    }
}
