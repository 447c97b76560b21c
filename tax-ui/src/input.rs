//! Validation of raw form text before any engine is invoked.
//!
//! Every function here takes the text exactly as the user typed it and
//! either returns a typed value or an [`InputError`] whose `Display` is the
//! message shown to the user.

use rust_decimal::Decimal;
use tax_core::WithholdingCategory;
use thiserror::Error;
use tracing::debug;

use crate::utils::parse_decimal;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid {field} (must be a number > 0).")]
    InvalidInput { field: &'static str, input: String },

    #[error("Please enter a valid interest rate (must be a number >= 0).")]
    InvalidRate { input: String },

    #[error("Please enter a valid loan term in years (must be > 0 and a whole number of months).")]
    InvalidYears { input: String },

    #[error("Please select a withholding category (rent, interest or dividend).")]
    MissingCategory,

    #[error("Unknown withholding category '{0}' (expected rent, interest or dividend).")]
    UnknownCategory(String),
}

/// Parses `raw` as a strictly positive amount.
///
/// `field` names the input in the error message, e.g. `"salary amount"`.
/// Commas are accepted as thousands separators. Empty text, zero, negative
/// and non-numeric input are all rejected.
pub fn parse_positive_amount(
    field: &'static str,
    raw: &str,
) -> Result<Decimal, InputError> {
    let invalid = || InputError::InvalidInput {
        field,
        input: raw.to_string(),
    };

    let value = parse_decimal(raw).map_err(|_| invalid())?;
    if value <= Decimal::ZERO {
        debug!(field, input = raw, "rejected non-positive amount");
        return Err(invalid());
    }
    Ok(value)
}

/// Parses an annual interest rate given as a percentage, e.g. `"12"` or
/// `"7.5"`. Zero is allowed.
pub fn parse_rate_percent(raw: &str) -> Result<Decimal, InputError> {
    let invalid = || InputError::InvalidRate {
        input: raw.to_string(),
    };

    if raw.trim().is_empty() {
        return Err(invalid());
    }
    let value = parse_decimal(raw.trim().trim_end_matches('%')).map_err(|_| invalid())?;
    if value < Decimal::ZERO {
        return Err(invalid());
    }
    Ok(value)
}

/// Parses a loan term in years. Fractions are fine when they come to whole
/// months, so `"1.5"` is accepted and `"1.05"` is not.
pub fn parse_years(raw: &str) -> Result<Decimal, InputError> {
    let invalid = || InputError::InvalidYears {
        input: raw.to_string(),
    };

    if raw.trim().is_empty() {
        return Err(invalid());
    }
    let years = parse_decimal(raw).map_err(|_| invalid())?;
    let whole_months = years
        .checked_mul(Decimal::from(12))
        .is_some_and(|months| months.fract().is_zero());
    if years <= Decimal::ZERO || !whole_months {
        debug!(input = raw, "rejected loan term");
        return Err(invalid());
    }
    Ok(years)
}

/// Resolves the withholding category selection.
pub fn parse_category(raw: Option<&str>) -> Result<WithholdingCategory, InputError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(InputError::MissingCategory);
    };
    WithholdingCategory::parse(raw).ok_or_else(|| InputError::UnknownCategory(raw.to_string()))
}
