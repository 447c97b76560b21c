//! Withholding tax on rent, bank interest and dividends.
//!
//! | Category | Rate | Tax-free threshold |
//! |----------|------|--------------------|
//! | rent     | 10%  | 100,000            |
//! | interest | 5%   | none               |
//! | dividend | 14%  | 100,000            |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::WithholdingCategory;
//! use tax_core::calculations::compute_withholding;
//!
//! let result = compute_withholding(WithholdingCategory::Rent, dec!(150000));
//!
//! assert_eq!(result.taxable_amount, dec!(50000));
//! assert_eq!(result.tax, dec!(5000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::positive_part;
use crate::models::WithholdingCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingResult {
    pub category: WithholdingCategory,
    pub amount: Decimal,
    pub taxable_amount: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

/// Computes withholding tax for `amount` under `category`'s rule.
pub fn compute_withholding(
    category: WithholdingCategory,
    amount: Decimal,
) -> WithholdingResult {
    let rule = category.rule();
    let taxable_amount = positive_part(amount - rule.threshold);
    let tax = taxable_amount * rule.rate;

    debug!(
        category = category.as_str(),
        %amount,
        %taxable_amount,
        %tax,
        "withholding tax calculated"
    );

    WithholdingResult {
        category,
        amount,
        taxable_amount,
        rate: rule.rate,
        tax,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn interest_is_flat_on_full_amount() {
        let result = compute_withholding(WithholdingCategory::Interest, dec!(50000));

        assert_eq!(result.taxable_amount, dec!(50000));
        assert_eq!(result.rate, dec!(0.05));
        assert_eq!(result.tax, dec!(2500));
    }

    #[test]
    fn rent_below_threshold_is_untaxed() {
        let result = compute_withholding(WithholdingCategory::Rent, dec!(50000));

        assert_eq!(result.taxable_amount, Decimal::ZERO);
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn rent_at_threshold_is_untaxed() {
        let result = compute_withholding(WithholdingCategory::Rent, dec!(100000));

        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn rent_above_threshold_taxes_excess() {
        let result = compute_withholding(WithholdingCategory::Rent, dec!(150000));

        assert_eq!(result.taxable_amount, dec!(50000));
        assert_eq!(result.tax, dec!(5000));
    }

    #[test]
    fn dividend_above_threshold_taxes_excess_at_14_percent() {
        let result = compute_withholding(WithholdingCategory::Dividend, dec!(250000));

        assert_eq!(result.taxable_amount, dec!(150000));
        assert_eq!(result.tax, dec!(21000));
    }

    #[test]
    fn dividend_below_threshold_is_untaxed() {
        let result = compute_withholding(WithholdingCategory::Dividend, dec!(99999.99));

        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn result_keeps_category_and_amount() {
        let result = compute_withholding(WithholdingCategory::Dividend, dec!(120000));

        assert_eq!(result.category, WithholdingCategory::Dividend);
        assert_eq!(result.amount, dec!(120000));
    }
}
