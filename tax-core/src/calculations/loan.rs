//! Leasing calculations: equated monthly installments and their inverse.
//!
//! With a monthly rate `i = annual% / 12 / 100` and `n = years × 12`
//! payments:
//!
//! | Quantity               | Formula                         | `i = 0`   |
//! |------------------------|---------------------------------|-----------|
//! | Monthly installment    | `P × i × (1+i)^n / ((1+i)^n − 1)` | `P / n` |
//! | Maximum loan for `M`   | `M × (1 − (1+i)^−n) / i`         | `M × n`  |
//!
//! A non-positive principal or payment, a non-positive term, or a negative
//! rate cannot be computed; those inputs produce zero rather than an error.
//! Terms may be fractional (`1.5` years is 18 payments) as long as they come
//! to a whole number of months.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::common::round_half_up;
//! use tax_core::calculations::compute_emi;
//!
//! let emi = compute_emi(dec!(100000), dec!(12), dec!(3)).unwrap();
//!
//! assert_eq!(round_half_up(emi), dec!(3321.43));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Longest schedule [`LoanCalculator::schedule`] will build (100 years).
pub const MAX_SCHEDULE_PAYMENTS: u64 = 1200;

const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    /// `(1 + i)^n` or a product built from it does not fit in a `Decimal`.
    #[error("loan arithmetic overflowed at {annual_rate_percent}% over {years} years")]
    Overflow {
        annual_rate_percent: Decimal,
        years: Decimal,
    },

    #[error("a term of {0} years is not a whole number of months")]
    PartialMonth(Decimal),

    #[error("schedule of {0} payments exceeds the limit of {max}", max = MAX_SCHEDULE_PAYMENTS)]
    ScheduleTooLong(u64),
}

/// Interest rate and duration of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Nominal annual rate as a percentage, e.g. `12` for 12%.
    pub annual_rate_percent: Decimal,
    pub years: Decimal,
}

impl LoanTerms {
    pub fn new(
        annual_rate_percent: Decimal,
        years: Decimal,
    ) -> Self {
        Self {
            annual_rate_percent,
            years,
        }
    }

    /// `years × 12`, or zero for a non-positive term.
    pub fn number_of_payments(&self) -> Result<u64, LoanError> {
        if self.years <= Decimal::ZERO {
            return Ok(0);
        }

        let months = self
            .years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| self.overflow())?;
        if !months.fract().is_zero() {
            return Err(LoanError::PartialMonth(self.years));
        }
        months.to_u64().ok_or_else(|| self.overflow())
    }

    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / MONTHS_PER_YEAR / Decimal::ONE_HUNDRED
    }

    fn is_computable(&self) -> bool {
        self.years > Decimal::ZERO && self.annual_rate_percent >= Decimal::ZERO
    }

    fn overflow(&self) -> LoanError {
        LoanError::Overflow {
            annual_rate_percent: self.annual_rate_percent,
            years: self.years,
        }
    }

    /// `(1 + i)^n`.
    fn growth_factor(
        &self,
        payments: u64,
    ) -> Result<Decimal, LoanError> {
        let exponent = i64::try_from(payments).map_err(|_| self.overflow())?;
        (Decimal::ONE + self.monthly_rate())
            .checked_powi(exponent)
            .ok_or_else(|| self.overflow())
    }
}

/// Totals over the life of a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub principal: Decimal,
    pub monthly_installment: Decimal,
    pub number_of_payments: u64,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub period: u64,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    /// Outstanding balance after this payment.
    pub balance: Decimal,
}

#[derive(Debug, Clone)]
pub struct LoanCalculator {
    terms: LoanTerms,
}

impl LoanCalculator {
    pub fn new(terms: LoanTerms) -> Self {
        Self { terms }
    }

    /// Level monthly payment that repays `principal` over the term.
    pub fn monthly_installment(
        &self,
        principal: Decimal,
    ) -> Result<Decimal, LoanError> {
        if principal <= Decimal::ZERO || !self.terms.is_computable() {
            debug!(%principal, terms = ?self.terms, "installment not computable");
            return Ok(Decimal::ZERO);
        }

        let payments = self.terms.number_of_payments()?;
        let i = self.terms.monthly_rate();
        if i.is_zero() {
            return Ok(principal / Decimal::from(payments));
        }

        let factor = self.terms.growth_factor(payments)?;
        let installment = principal
            .checked_mul(i)
            .and_then(|v| v.checked_mul(factor))
            .and_then(|v| v.checked_div(factor - Decimal::ONE))
            .ok_or_else(|| self.terms.overflow())?;

        debug!(%principal, %installment, "monthly installment calculated");
        Ok(installment)
    }

    /// Largest principal whose monthly installment is `max_payment`.
    pub fn max_loan(
        &self,
        max_payment: Decimal,
    ) -> Result<Decimal, LoanError> {
        if max_payment <= Decimal::ZERO || !self.terms.is_computable() {
            debug!(%max_payment, terms = ?self.terms, "max loan not computable");
            return Ok(Decimal::ZERO);
        }

        let payments = self.terms.number_of_payments()?;
        let i = self.terms.monthly_rate();
        if i.is_zero() {
            return max_payment
                .checked_mul(Decimal::from(payments))
                .ok_or_else(|| self.terms.overflow());
        }

        // M * (1 - (1+i)^-n) / i, rearranged to avoid a negative power.
        let factor = self.terms.growth_factor(payments)?;
        let principal = i
            .checked_mul(factor)
            .and_then(|divisor| {
                max_payment
                    .checked_mul(factor - Decimal::ONE)?
                    .checked_div(divisor)
            })
            .ok_or_else(|| self.terms.overflow())?;

        debug!(%max_payment, %principal, "max loan calculated");
        Ok(principal)
    }

    pub fn summary(
        &self,
        principal: Decimal,
    ) -> Result<LoanSummary, LoanError> {
        let monthly_installment = self.monthly_installment(principal)?;
        let number_of_payments = self.terms.number_of_payments()?;

        if monthly_installment.is_zero() {
            return Ok(LoanSummary {
                principal,
                monthly_installment,
                number_of_payments,
                total_payment: Decimal::ZERO,
                total_interest: Decimal::ZERO,
            });
        }

        let total_payment = monthly_installment
            .checked_mul(Decimal::from(number_of_payments))
            .ok_or_else(|| self.terms.overflow())?;

        Ok(LoanSummary {
            principal,
            monthly_installment,
            number_of_payments,
            total_payment,
            total_interest: total_payment - principal,
        })
    }

    /// Month-by-month split of each installment into interest and principal.
    ///
    /// The final row repays whatever balance remains, so the schedule always
    /// closes at exactly zero.
    pub fn schedule(
        &self,
        principal: Decimal,
    ) -> Result<Vec<Installment>, LoanError> {
        let payments = self.terms.number_of_payments()?;
        if payments > MAX_SCHEDULE_PAYMENTS {
            warn!(payments, "refusing to build oversized schedule");
            return Err(LoanError::ScheduleTooLong(payments));
        }

        let installment = self.monthly_installment(principal)?;
        if installment.is_zero() {
            return Ok(Vec::new());
        }

        let i = self.terms.monthly_rate();
        let mut balance = principal;
        let mut rows = Vec::with_capacity(payments as usize);

        for period in 1..=payments {
            let interest = balance * i;
            let repaid = if period == payments {
                balance
            } else {
                installment - interest
            };
            balance -= repaid;

            rows.push(Installment {
                period,
                payment: interest + repaid,
                interest,
                principal: repaid,
                balance,
            });
        }

        Ok(rows)
    }
}

/// Monthly installment for `principal` at `annual_rate_percent` over `years`.
pub fn compute_emi(
    principal: Decimal,
    annual_rate_percent: Decimal,
    years: Decimal,
) -> Result<Decimal, LoanError> {
    LoanCalculator::new(LoanTerms::new(annual_rate_percent, years)).monthly_installment(principal)
}

/// Largest principal affordable with `max_monthly_payment`.
pub fn compute_max_loan(
    max_monthly_payment: Decimal,
    annual_rate_percent: Decimal,
    years: Decimal,
) -> Result<Decimal, LoanError> {
    LoanCalculator::new(LoanTerms::new(annual_rate_percent, years)).max_loan(max_monthly_payment)
}
