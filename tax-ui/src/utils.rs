use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::calculations::common::round_half_up;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,46,500.02"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Digit grouping used when formatting currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Thousands, then lakhs and crores: `12,34,567.00`.
    #[default]
    Indian,
    /// Groups of three: `1,234,567.00`.
    Western,
}

/// How amounts are shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Prefix printed before every amount, e.g. `LKR`. May be empty.
    pub code: String,
    pub grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            code: "LKR".to_string(),
            grouping: Grouping::Indian,
        }
    }
}

impl CurrencyFormat {
    /// Formats `value` rounded half-up to two places, with grouping and the
    /// currency code.
    pub fn format(
        &self,
        value: Decimal,
    ) -> String {
        let number = format_grouped(value, self.grouping);
        if self.code.is_empty() {
            number
        } else {
            format!("{} {}", self.code, number)
        }
    }
}

/// Formats `value` to two decimal places with digit grouping and no currency
/// code.
pub fn format_grouped(
    value: Decimal,
    grouping: Grouping,
) -> String {
    let rounded = round_half_up(value);
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let grouped = match grouping {
        Grouping::Western => group_digits(integer, 3),
        Grouping::Indian => match integer.len() {
            0..=3 => integer.to_string(),
            len => {
                let (head, tail) = integer.split_at(len - 3);
                format!("{},{}", group_digits(head, 2), tail)
            }
        },
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

/// Inserts a comma every `size` digits counting from the right.
fn group_digits(
    digits: &str,
    size: usize,
) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / size);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
