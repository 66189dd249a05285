//! Summary
//!
//! The read-only view of a finalized order, and the table rendering shared
//! with the live preview of an order still being edited.

use std::io;

use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    money::{self, Amount},
    order::{LineItem, Order, OrderId},
    roster::CashierEntry,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One line of a finalized order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    /// Product code
    pub code: String,

    /// Product display name
    pub name: String,

    /// Unit price
    pub unit_price: Amount,

    /// Quantity
    pub quantity: u32,

    /// Line total
    pub total: Amount,
}

impl TryFrom<&LineItem> for SummaryLine {
    type Error = ();

    fn try_from(line: &LineItem) -> Result<Self, Self::Error> {
        let (Some(product), Some(quantity), Some(total)) =
            (line.product(), line.quantity(), line.total())
        else {
            return Err(());
        };

        Ok(SummaryLine {
            code: product.code.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            total,
        })
    }
}

/// Final, read-only summary of an order.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    id: OrderId,
    placed_at: Timestamp,
    cashier: CashierEntry,
    lines: Vec<SummaryLine>,
    grand_total: Amount,
    payment: Option<Amount>,
    change: Option<Amount>,
}

impl OrderSummary {
    pub(crate) fn new(
        id: OrderId,
        placed_at: Timestamp,
        cashier: CashierEntry,
        lines: Vec<SummaryLine>,
        grand_total: Amount,
        payment: Option<Amount>,
        change: Option<Amount>,
    ) -> Self {
        Self {
            id,
            placed_at,
            cashier,
            lines,
            grand_total,
            payment,
            change,
        }
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

    /// Cashier who rang up the order
    #[must_use]
    pub fn cashier(&self) -> &CashierEntry {
        &self.cashier
    }

    /// Line items, in order
    #[must_use]
    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// Sum of line totals
    #[must_use]
    pub fn grand_total(&self) -> Amount {
        self.grand_total
    }

    /// Amount paid, if one was entered
    #[must_use]
    pub fn payment(&self) -> Option<Amount> {
        self.payment
    }

    /// Change due, `None` when no payment was entered
    #[must_use]
    pub fn change(&self) -> Option<Amount> {
        self.change
    }

    /// Writes the summary as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        let sheet = Sheet {
            id: self.id,
            placed_at: self.placed_at,
            cashier: Some(&self.cashier),
            rows: self
                .lines
                .iter()
                .map(|line| Row {
                    name: line.name.clone(),
                    unit_price: Some(line.unit_price),
                    quantity: Some(line.quantity),
                    total: Some(line.total),
                })
                .collect(),
            grand_total: Some(self.grand_total),
            payment: self.payment,
            change: self.change,
        };

        sheet.write_to(&mut out)
    }
}

/// Writes a preview of an order that is still being edited.
///
/// Undefined values are left blank.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_preview(order: &Order<'_>, mut out: impl io::Write) -> Result<(), SummaryError> {
    let sheet = Sheet {
        id: order.id(),
        placed_at: order.placed_at(),
        cashier: order.cashier(),
        rows: order
            .lines()
            .iter()
            .map(|line| Row {
                name: line.name().unwrap_or_default().to_string(),
                unit_price: line.unit_price(),
                quantity: line.quantity(),
                total: line.total(),
            })
            .collect(),
        grand_total: order.grand_total(),
        payment: order.payment(),
        change: order.change(),
    };

    sheet.write_to(&mut out)
}

struct Row {
    name: String,
    unit_price: Option<Amount>,
    quantity: Option<u32>,
    total: Option<Amount>,
}

struct Sheet<'a> {
    id: OrderId,
    placed_at: Timestamp,
    cashier: Option<&'a CashierEntry>,
    rows: Vec<Row>,
    grand_total: Option<Amount>,
    payment: Option<Amount>,
    change: Option<Amount>,
}

impl Sheet<'_> {
    fn write_to(&self, out: &mut impl io::Write) -> Result<(), SummaryError> {
        let cashier = self
            .cashier
            .map(|cashier| format!("{} - {}", cashier.code, cashier.name))
            .unwrap_or_default();

        writeln!(out)?;
        writeln!(out, " Order:    {}", self.id)?;
        writeln!(out, " Cashier:  {cashier}")?;
        writeln!(out, " Date:     {}", self.placed_at.strftime("%d/%m/%Y"))?;

        let mut builder = Builder::default();

        builder.push_record(["#", "Item", "Price", "Qty", "Total"]);

        for (idx, row) in self.rows.iter().enumerate() {
            builder.push_record([
                format!("{}", idx + 1),
                row.name.clone(),
                money::display(row.unit_price),
                row.quantity.map(|q| q.to_string()).unwrap_or_default(),
                money::display(row.total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..), Alignment::right());

        writeln!(out, "\n{table}")?;

        let totals = [
            ("Grand total:", money::display(self.grand_total)),
            ("Payment:", money::display(self.payment)),
            ("Change:", money::display(self.change)),
        ];

        let label_width = totals
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or_default();

        let value_width = totals
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or_default();

        for (label, value) in &totals {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}
