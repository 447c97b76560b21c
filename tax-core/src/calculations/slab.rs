//! Progressive slab tax engine.
//!
//! Walks an amount through a [`BracketTable`] from the lowest bracket up,
//! taxing the slice of the amount that falls inside each bracket at that
//! bracket's rate. The same engine serves the monthly payable tax table and
//! the annual income tax table.
//!
//! # Boundaries
//!
//! Each bracket covers `(previous upper bound, upper bound]`: an amount equal
//! to a bound is taxed entirely in the lower bracket, so there is no cliff at
//! bracket edges.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::BracketTable;
//! use tax_core::calculations::SlabTaxCalculator;
//!
//! let table = BracketTable::monthly();
//! let result = SlabTaxCalculator::new(&table).calculate(dec!(150000));
//!
//! assert_eq!(result.total_tax, dec!(3499.98));
//! assert_eq!(result.net_amount, dec!(146500.02));
//! assert_eq!(result.applied_rates.to_string(), "0%, 6%, 12%");
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::models::{AppliedRates, BracketContribution, BracketTable, TaxBracket, TaxResult};

/// Calculator bound to one bracket table.
#[derive(Debug, Clone)]
pub struct SlabTaxCalculator<'a> {
    table: &'a BracketTable,
}

impl<'a> SlabTaxCalculator<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    /// Computes the tax owed on `amount`.
    ///
    /// Non-positive amounts yield a zero-tax result with an empty breakdown;
    /// callers are expected to reject them before getting here.
    pub fn calculate(
        &self,
        amount: Decimal,
    ) -> TaxResult {
        let mut total_tax = Decimal::ZERO;
        let mut applied_rates = AppliedRates::new();
        let mut breakdown = Vec::new();

        let first = self.table.first();
        if self.within(amount, first) {
            applied_rates.insert(first.rate);
        }

        let mut previous_upper_bound = Decimal::ZERO;
        for bracket in self.table.brackets() {
            let in_bracket = self.amount_in_bracket(amount, bracket, previous_upper_bound);
            trace!(
                lower = %previous_upper_bound,
                upper = ?bracket.upper_bound,
                rate = %bracket.rate,
                in_bracket = %in_bracket,
                "evaluating bracket"
            );

            if in_bracket > Decimal::ZERO {
                let tax = in_bracket * bracket.rate;
                total_tax += tax;
                applied_rates.insert(bracket.rate);

                if !bracket.rate.is_zero() {
                    breakdown.push(BracketContribution {
                        lower_bound: previous_upper_bound,
                        upper_bound: previous_upper_bound + in_bracket,
                        taxable_amount: in_bracket,
                        rate: bracket.rate,
                        tax,
                    });
                }
            }

            match bracket.upper_bound {
                Some(bound) if amount > bound => previous_upper_bound = bound,
                _ => break,
            }
        }

        let net_amount = amount - total_tax;
        debug!(
            %amount,
            %total_tax,
            %net_amount,
            brackets = breakdown.len(),
            "slab tax calculated"
        );

        TaxResult {
            amount,
            total_tax,
            net_amount,
            applied_rates,
            breakdown,
        }
    }

    /// Whether `amount` is fully consumed by `bracket` (it never exceeds the
    /// bracket's upper bound).
    fn within(
        &self,
        amount: Decimal,
        bracket: &TaxBracket,
    ) -> bool {
        bracket.upper_bound.is_none_or(|bound| amount <= bound)
    }

    /// Portion of `amount` above `previous_upper_bound` and at or below the
    /// bracket's upper bound. Negative when the amount never reaches the
    /// bracket.
    fn amount_in_bracket(
        &self,
        amount: Decimal,
        bracket: &TaxBracket,
        previous_upper_bound: Decimal,
    ) -> Decimal {
        let capped = match bracket.upper_bound {
            Some(bound) => amount.min(bound),
            None => amount,
        };
        capped - previous_upper_bound
    }
}

/// Computes slab tax for `amount` against `table`.
pub fn compute_slab_tax(
    amount: Decimal,
    table: &BracketTable,
) -> TaxResult {
    SlabTaxCalculator::new(table).calculate(amount)
}
