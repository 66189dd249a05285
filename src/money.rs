//! Money

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, IDR, SGD, USD},
};
use thiserror::Error;

/// A monetary amount in the store currency.
pub type Amount = Money<'static, Currency>;

/// Errors that can occur while parsing prices and currency codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The price string was not in the "AMOUNT CURRENCY" format.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by its ISO alpha code.
///
/// # Errors
///
/// Returns [`PriceError::UnknownCurrency`] if the code is not supported.
pub fn currency(code: &str) -> Result<&'static Currency, PriceError> {
    match code.trim() {
        "IDR" => Ok(IDR),
        "USD" => Ok(USD),
        "GBP" => Ok(GBP),
        "EUR" => Ok(EUR),
        "SGD" => Ok(SGD),
        other => Err(PriceError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a price string (e.g., "10000 IDR") into an [`Amount`].
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<Amount, PriceError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(PriceError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = currency(code)?;

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PriceError::InvalidPrice(s.to_string()))?;

    let minor_units =
        to_minor_units(amount, currency).ok_or_else(|| PriceError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse a free-form amount entered at the till (e.g., a payment) in the given currency.
///
/// Returns `None` when the input is empty or not a number, so that an absent
/// payment stays undefined instead of becoming zero.
pub fn parse_amount(s: &str, currency: &'static Currency) -> Option<Amount> {
    let amount = s.trim().parse::<Decimal>().ok()?;

    to_minor_units(amount, currency).map(|minor| Money::from_minor(minor, currency))
}

/// Multiply a unit price by a quantity, or `None` if the result does not fit.
pub fn times(price: Amount, quantity: u32) -> Option<Amount> {
    price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .map(|minor| Money::from_minor(minor, price.currency()))
}

/// Sum amounts in the given currency.
///
/// Any undefined amount makes the whole sum undefined.
pub fn sum<I>(amounts: I, currency: &'static Currency) -> Option<Amount>
where
    I: IntoIterator<Item = Option<Amount>>,
{
    amounts
        .into_iter()
        .try_fold(0_i64, |acc, amount| {
            let amount = amount?;

            if amount.currency() == currency {
                acc.checked_add(amount.to_minor_units())
            } else {
                None
            }
        })
        .map(|minor| Money::from_minor(minor, currency))
}

/// Subtract `rhs` from `lhs`, or `None` if either side is undefined.
pub fn difference(lhs: Option<Amount>, rhs: Option<Amount>) -> Option<Amount> {
    let (lhs, rhs) = (lhs?, rhs?);

    if lhs.currency() != rhs.currency() {
        return None;
    }

    lhs.to_minor_units()
        .checked_sub(rhs.to_minor_units())
        .map(|minor| Money::from_minor(minor, lhs.currency()))
}

/// Render an optional amount, leaving undefined values blank.
pub fn display(amount: Option<Amount>) -> String {
    amount.map(|amount| amount.to_string()).unwrap_or_default()
}

fn to_minor_units(amount: Decimal, currency: &Currency) -> Option<i64> {
    let scale = 10_i64.checked_pow(currency.exponent)?;

    amount
        .checked_mul(Decimal::from(scale))
        .and_then(|value| value.round_dp(0).to_i64())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("10000IDR");

        assert!(matches!(result, Err(PriceError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(PriceError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_rejects_non_numeric_amount() {
        let result = parse_price("ten IDR");

        assert!(matches!(result, Err(PriceError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_scales_to_minor_units() -> TestResult {
        let price = parse_price("2.50 USD")?;

        assert_eq!(price, Money::from_minor(250, USD));

        Ok(())
    }

    #[test]
    fn parse_amount_is_undefined_for_empty_or_text() {
        assert_eq!(parse_amount("", IDR), None);
        assert_eq!(parse_amount("   ", IDR), None);
        assert_eq!(parse_amount("lots", IDR), None);
    }

    #[test]
    fn parse_amount_matches_parse_price() -> TestResult {
        assert_eq!(parse_amount(" 100000 ", IDR), Some(parse_price("100000 IDR")?));

        Ok(())
    }

    #[test]
    fn times_multiplies_minor_units() {
        let price = Money::from_minor(1_000, USD);

        assert_eq!(times(price, 3), Some(Money::from_minor(3_000, USD)));
        assert_eq!(times(price, 0), Some(Money::from_minor(0, USD)));
    }

    #[test]
    fn times_overflow_is_undefined() {
        let price = Money::from_minor(i64::MAX, USD);

        assert_eq!(times(price, 2), None);
    }

    #[test]
    fn sum_propagates_undefined() {
        let amounts = [Some(Money::from_minor(100, USD)), None];

        assert_eq!(sum(amounts, USD), None);
    }

    #[test]
    fn sum_adds_defined_amounts() {
        let amounts = [
            Some(Money::from_minor(100, USD)),
            Some(Money::from_minor(250, USD)),
        ];

        assert_eq!(sum(amounts, USD), Some(Money::from_minor(350, USD)));
    }

    #[test]
    fn sum_rejects_foreign_currency() {
        let amounts = [Some(Money::from_minor(100, GBP))];

        assert_eq!(sum(amounts, USD), None);
    }

    #[test]
    fn difference_is_undefined_without_both_sides() {
        let amount = Some(Money::from_minor(100, USD));

        assert_eq!(difference(None, amount), None);
        assert_eq!(difference(amount, None), None);
    }

    #[test]
    fn difference_can_go_negative() {
        let lhs = Some(Money::from_minor(100, USD));
        let rhs = Some(Money::from_minor(250, USD));

        assert_eq!(difference(lhs, rhs), Some(Money::from_minor(-150, USD)));
    }

    #[test]
    fn display_leaves_undefined_blank() {
        assert_eq!(display(None), "");
        assert!(!display(Some(Money::from_minor(100, USD))).is_empty());
    }
}
