//! Command line front end
//!
//! Rings up a single order from command line arguments and prints its summary.

use std::{io, path::PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing::info;

use crate::{
    order::{FinalizeError, Order, OrderError, parse_quantity},
    store::{Store, StoreError},
    summary::{SummaryError, write_preview},
};

/// Errors returned by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An edit was rejected.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The order could not be finalized.
    #[error(transparent)]
    Finalize(#[from] FinalizeError),

    /// The summary could not be written.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// An `--item` argument was not in `CODE[:QTY]` form.
    #[error("Invalid item {0}, expected CODE[:QTY]")]
    InvalidItem(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Single-order point of sale calculator
#[derive(Debug, Parser)]
#[command(name = "till", about = "Ring up an order and print its summary", long_about = None)]
pub struct Args {
    /// Store file (YAML) with currency, products and cashiers; defaults to the built-in store
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Cashier code
    #[arg(short, long)]
    pub cashier: Option<String>,

    /// Line item as `CODE` or `CODE:QTY`; repeat for more lines
    #[arg(short, long = "item", value_name = "CODE[:QTY]")]
    pub items: Vec<String>,

    /// Payment amount in the store currency
    #[arg(short, long)]
    pub payment: Option<String>,

    /// List the catalog and cashiers instead of ringing up an order
    #[arg(long)]
    pub list: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

/// A parsed `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    /// Product code
    pub code: String,

    /// Quantity text, if given
    pub quantity: Option<String>,
}

impl ItemArg {
    /// Parse `CODE` or `CODE:QTY`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidItem`] if the code is blank.
    pub fn parse(arg: &str) -> Result<Self, CliError> {
        let (code, quantity) = match arg.split_once(':') {
            Some((code, quantity)) => (code, Some(quantity.to_string())),
            None => (arg, None),
        };

        if code.trim().is_empty() {
            return Err(CliError::InvalidItem(arg.to_string()));
        }

        Ok(Self {
            code: code.trim().to_string(),
            quantity,
        })
    }
}

/// Load the store named by the arguments.
///
/// # Errors
///
/// Returns an error if the store file cannot be loaded.
pub fn load_store(args: &Args) -> Result<Store, CliError> {
    let store = match &args.store {
        Some(path) => Store::from_path(path)?,
        None => Store::builtin()?,
    };

    Ok(store)
}

/// Run the front end against `out`.
///
/// With `--list`, prints the catalog and roster. Otherwise rings up the order
/// and prints its summary. If the order cannot be finalized, a preview and the
/// blocking fields are printed before the error is returned.
///
/// # Errors
///
/// Returns an error if the store cannot be loaded, an edit is rejected, the
/// order is invalid, or the output cannot be written.
pub fn run(args: &Args, mut out: impl io::Write) -> Result<(), CliError> {
    let store = load_store(args)?;

    if args.list {
        return write_listing(&store, &mut out);
    }

    let mut order = Order::new(&store);

    if let Some(code) = &args.cashier {
        order.set_cashier(code)?;
    }

    for (idx, item) in args.items.iter().enumerate() {
        let item = ItemArg::parse(item)?;

        let line = if idx == 0 { 0 } else { order.add_line()? };

        order.select_product(line, &item.code)?;

        if let Some(quantity) = &item.quantity {
            order.set_quantity(line, parse_quantity(quantity))?;
        }
    }

    if let Some(payment) = &args.payment {
        order.enter_payment(payment);
    }

    match order.finalize() {
        Ok(summary) => {
            info!(order = %summary.id(), "summary written");

            summary.write_to(&mut out)?;

            Ok(())
        }
        Err(FinalizeError::Invalid(errors)) => {
            write_preview(&order, &mut out)?;

            for error in &errors {
                writeln!(out, " ! {error}")?;
            }

            Err(FinalizeError::Invalid(errors).into())
        }
    }
}

fn write_listing(store: &Store, out: &mut impl io::Write) -> Result<(), CliError> {
    writeln!(out, "Products:")?;

    for entry in store.catalog().iter() {
        writeln!(out, "  {:<6} {:<24} {}", entry.code, entry.name, entry.price)?;
    }

    writeln!(out, "Cashiers:")?;

    for cashier in store.roster().iter() {
        writeln!(out, "  {:<6} {}", cashier.code, cashier.name)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_arg_parses_code_only() -> Result<(), CliError> {
        let item = ItemArg::parse("P001")?;

        assert_eq!(item.code, "P001");
        assert_eq!(item.quantity, None);

        Ok(())
    }

    #[test]
    fn item_arg_parses_quantity() -> Result<(), CliError> {
        let item = ItemArg::parse("P001:3")?;

        assert_eq!(item.code, "P001");
        assert_eq!(item.quantity.as_deref(), Some("3"));

        Ok(())
    }

    #[test]
    fn item_arg_rejects_blank_code() {
        assert!(matches!(ItemArg::parse(":3"), Err(CliError::InvalidItem(_))));
    }

    #[test]
    fn args_parse_repeated_items() -> Result<(), clap::Error> {
        let args = Args::try_parse_from([
            "till", "-c", "K01", "-i", "P001:3", "--item", "P002", "-p", "100000",
        ])?;

        assert_eq!(args.cashier.as_deref(), Some("K01"));
        assert_eq!(args.items, vec!["P001:3".to_string(), "P002".to_string()]);
        assert_eq!(args.payment.as_deref(), Some("100000"));
        assert!(!args.list);

        Ok(())
    }
}
