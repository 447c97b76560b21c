//! Social Security Contribution Levy style compound tax.
//!
//! Sale tax is charged on the base value first; VAT is then charged on the
//! base value plus sale tax, so the order of the two steps matters.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::compute_sscl;
//!
//! let result = compute_sscl(dec!(1000)).unwrap();
//!
//! assert_eq!(result.sale_tax, dec!(25));
//! assert_eq!(result.after_sale_tax, dec!(1025));
//! assert_eq!(result.vat, dec!(153.75));
//! assert_eq!(result.total, dec!(178.75));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SsclError {
    #[error("sale tax rate must be at least 0 and below 1, got {0}")]
    InvalidSaleTaxRate(Decimal),

    #[error("VAT rate must be at least 0 and below 1, got {0}")]
    InvalidVatRate(Decimal),

    #[error("SSCL on {0} is too large to calculate")]
    Overflow(Decimal),
}

/// Rates used by [`SsclCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsclConfig {
    /// Charged on the base value. Defaults to 2.5%.
    pub sale_tax_rate: Decimal,
    /// Charged on the base value plus sale tax. Defaults to 15%.
    pub vat_rate: Decimal,
}

impl Default for SsclConfig {
    fn default() -> Self {
        Self {
            sale_tax_rate: dec!(0.025),
            vat_rate: dec!(0.15),
        }
    }
}

impl SsclConfig {
    pub fn validate(&self) -> Result<(), SsclError> {
        if !is_fraction(self.sale_tax_rate) {
            return Err(SsclError::InvalidSaleTaxRate(self.sale_tax_rate));
        }
        if !is_fraction(self.vat_rate) {
            return Err(SsclError::InvalidVatRate(self.vat_rate));
        }
        Ok(())
    }
}

/// Same `[0, 1)` range bracket rates are held to.
fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate < Decimal::ONE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsclResult {
    pub base_value: Decimal,
    pub sale_tax: Decimal,
    pub after_sale_tax: Decimal,
    pub vat: Decimal,
    /// Sale tax plus VAT.
    pub total: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct SsclCalculator {
    config: SsclConfig,
}

impl SsclCalculator {
    /// Creates a calculator after validating `config`.
    pub fn new(config: SsclConfig) -> Result<Self, SsclError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SsclConfig {
        &self.config
    }

    /// Fails only when `base_value` is so large in magnitude that the
    /// amount after sale tax no longer fits.
    pub fn calculate(
        &self,
        base_value: Decimal,
    ) -> Result<SsclResult, SsclError> {
        let overflow = || SsclError::Overflow(base_value);

        let sale_tax = base_value
            .checked_mul(self.config.sale_tax_rate)
            .ok_or_else(overflow)?;
        let after_sale_tax = base_value.checked_add(sale_tax).ok_or_else(overflow)?;
        let vat = after_sale_tax
            .checked_mul(self.config.vat_rate)
            .ok_or_else(overflow)?;
        let total = sale_tax.checked_add(vat).ok_or_else(overflow)?;

        debug!(%base_value, %sale_tax, %vat, %total, "sscl calculated");

        Ok(SsclResult {
            base_value,
            sale_tax,
            after_sale_tax,
            vat,
            total,
        })
    }
}

/// Computes the compound tax with the default rates.
pub fn compute_sscl(base_value: Decimal) -> Result<SsclResult, SsclError> {
    SsclCalculator::default().calculate(base_value)
}
