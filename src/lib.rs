//! Till
//!
//! Till is a single-order point of sale calculator: choose a cashier, add line
//! items from a fixed catalog, enter quantities and a payment, and it keeps the
//! line totals, grand total and change consistent before producing a read-only
//! summary.

pub mod catalog;
pub mod cli;
pub mod money;
pub mod order;
pub mod prelude;
pub mod roster;
pub mod store;
pub mod summary;
