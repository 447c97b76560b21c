use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Formats a rate fraction as a percentage label, e.g. `0.06` as `"6%"`.
pub fn rate_label(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Rates applied during a slab computation, de-duplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppliedRates(Vec<Decimal>);

impl AppliedRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `rate`, ignoring it if an equal rate was already recorded.
    ///
    /// Returns `true` when the rate was newly added.
    pub fn insert(
        &mut self,
        rate: Decimal,
    ) -> bool {
        if self.contains(rate) {
            return false;
        }
        self.0.push(rate);
        true
    }

    pub fn contains(
        &self,
        rate: Decimal,
    ) -> bool {
        self.0.iter().any(|r| *r == rate)
    }

    pub fn rates(&self) -> &[Decimal] {
        &self.0
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().copied().map(rate_label).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AppliedRates {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.labels().join(", "))
    }
}

/// Tax owed on the part of an amount that falls inside one bracket.
///
/// Covers the half-open range `(lower_bound, upper_bound]`, where
/// `upper_bound` is already capped at the taxed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub taxable_amount: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

/// Outcome of walking an amount through a bracket table.
///
/// Values are unrounded; `net_amount + total_tax == amount` holds exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub amount: Decimal,
    pub total_tax: Decimal,
    pub net_amount: Decimal,
    pub applied_rates: AppliedRates,
    pub breakdown: Vec<BracketContribution>,
}
