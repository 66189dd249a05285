//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogEntry, CatalogError},
    money::{Amount, PriceError, parse_amount, parse_price},
    order::{
        FieldError, FieldErrors, FinalizeError, LineItem, MAX_LINE_ITEMS, Order, OrderError,
        OrderId, parse_quantity,
    },
    roster::{CashierEntry, Roster, RosterError},
    store::{Store, StoreError},
    summary::{OrderSummary, SummaryError, SummaryLine, write_preview},
};
