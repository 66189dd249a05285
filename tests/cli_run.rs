//! Integration tests for the command line front end.

use clap::Parser;
use testresult::TestResult;

use till::{
    cli::{Args, CliError, run},
    prelude::*,
};

fn args(argv: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("till").chain(argv.iter().copied()))
}

#[test]
fn prints_summary_for_valid_order() -> TestResult {
    let args = args(&["-c", "CSR001", "-i", "PRD001:3", "-i", "PRD002", "-p", "100000"])?;

    let mut out = Vec::new();
    run(&args, &mut out)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("CSR001 - Bambang M. Azhari"));
    assert!(text.contains("Produk 1"));
    assert!(text.contains("Produk 2"));
    assert!(text.contains(&parse_price("50000 IDR")?.to_string()));
    assert!(text.contains(&parse_price("100000 IDR")?.to_string()));
    assert!(text.contains("ORDER-"));

    Ok(())
}

#[test]
fn prints_summary_without_payment() -> TestResult {
    let args = args(&["-c", "CSR002", "-i", "PRD003"])?;

    let mut out = Vec::new();
    run(&args, &mut out)?;
    let text = String::from_utf8(out)?;

    let change = text
        .lines()
        .find(|line| line.contains("Change:"))
        .ok_or("missing change line")?;

    assert_eq!(change.trim(), "Change:");
    assert!(text.contains(&parse_price("30000 IDR")?.to_string()));

    Ok(())
}

#[test]
fn invalid_order_prints_preview_and_errors() -> TestResult {
    let args = args(&["-i", "PRD001:0"])?;

    let mut out = Vec::new();
    let result = run(&args, &mut out);
    let text = String::from_utf8(out)?;

    assert!(matches!(result, Err(CliError::Finalize(FinalizeError::Invalid(_)))));
    assert!(text.contains("Produk 1"));
    assert!(text.contains("cashier is required"));
    assert!(text.contains("line 1: quantity must be at least 1"));

    Ok(())
}

#[test]
fn unknown_product_is_rejected() -> TestResult {
    let args = args(&["-c", "CSR001", "-i", "NOPE"])?;

    let result = run(&args, Vec::new());

    assert!(matches!(
        result,
        Err(CliError::Order(OrderError::UnknownProduct(code))) if code == "NOPE"
    ));

    Ok(())
}

#[test]
fn eleventh_item_is_rejected() -> TestResult {
    let mut argv = vec!["-c", "CSR001", "-p", "1000000"];

    for _ in 0..11 {
        argv.extend(["-i", "PRD002"]);
    }

    let result = run(&args(&argv)?, Vec::new());

    assert!(matches!(result, Err(CliError::Order(OrderError::TooManyLines))));

    Ok(())
}

#[test]
fn list_prints_catalog_and_cashiers() -> TestResult {
    let args = args(&["--list"])?;

    let mut out = Vec::new();
    run(&args, &mut out)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("Products:"));
    assert!(text.contains("PRD003"));
    assert!(text.contains("Cashiers:"));
    assert!(text.contains("Mohammad Azhari"));

    Ok(())
}
