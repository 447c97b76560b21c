//! Helpers shared by the calculators.
//!
//! The engines keep full `Decimal` precision; [`round_half_up`] is meant for
//! the presentation boundary, where figures are shown to two places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, sending midpoints away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3499.98)), dec!(3499.98));
/// assert_eq!(round_half_up(dec!(153.745)), dec!(153.75));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative values to zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::positive_part;
///
/// assert_eq!(positive_part(dec!(50000) - dec!(100000)), Decimal::ZERO);
/// assert_eq!(positive_part(dec!(150000) - dec!(100000)), dec!(50000));
/// ```
pub fn positive_part(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}
