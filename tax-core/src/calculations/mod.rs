//! Calculation modules for the tax and leasing calculators.
//!
//! Every calculation is a pure function of its inputs. Results carry full
//! `Decimal` precision; round with [`common::round_half_up`] when displaying.

pub mod common;
pub mod loan;
pub mod slab;
pub mod sscl;
pub mod withholding;

pub use loan::{
    Installment, LoanCalculator, LoanError, LoanSummary, LoanTerms, compute_emi, compute_max_loan,
};
pub use slab::{SlabTaxCalculator, compute_slab_tax};
pub use sscl::{SsclCalculator, SsclConfig, SsclError, SsclResult, compute_sscl};
pub use withholding::{WithholdingResult, compute_withholding};
