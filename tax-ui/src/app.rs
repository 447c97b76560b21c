//! Module routing: validated requests in, engine outcomes out.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::{
    Installment, LoanCalculator, LoanError, LoanSummary, LoanTerms, SlabTaxCalculator,
    SsclCalculator, SsclConfig, SsclError, SsclResult, WithholdingResult,
    compute_withholding,
};
use tax_core::{BracketTable, TaxResult, WithholdingCategory};
use tax_data::{BracketTableLoader, BracketTableLoaderError};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppConfig;

pub const MONTHLY_TABLE: &str = "monthly";
pub const ANNUAL_TABLE: &str = "annual";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Brackets(#[from] BracketTableLoaderError),

    #[error("bracket file has no '{0}' table")]
    MissingTable(&'static str),

    #[error(transparent)]
    Sscl(#[from] SsclError),

    #[error(transparent)]
    Loan(#[from] LoanError),
}

/// The calculator modules offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    #[default]
    Payable,
    Withholding,
    Income,
    Sscl,
    Leasing,
}

impl Module {
    /// Modules in menu order.
    pub fn all() -> &'static [Module] {
        &[
            Module::Payable,
            Module::Withholding,
            Module::Income,
            Module::Sscl,
            Module::Leasing,
        ]
    }

    /// Subcommand that opens this module.
    pub fn command(&self) -> &'static str {
        match self {
            Module::Payable => "payable",
            Module::Withholding => "withholding",
            Module::Income => "income",
            Module::Sscl => "sscl",
            Module::Leasing => "leasing",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Module::Payable => "Payable Tax",
            Module::Withholding => "Withholding Tax",
            Module::Income => "Income Tax",
            Module::Sscl => "SSCL Tax",
            Module::Leasing => "Leasing Calculator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Module::Payable => "Monthly tax deducted from employment income (PAYE).",
            Module::Withholding => "Tax withheld at source on rent, bank interest and dividends.",
            Module::Income => "Annual income tax on total assessable income.",
            Module::Sscl => "Social Security Contribution Levy with VAT on a sale value.",
            Module::Leasing => "Monthly lease installment, or the largest loan a payment allows.",
        }
    }
}

/// Validated inputs for one calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Payable {
        salary: Decimal,
    },
    Income {
        income: Decimal,
    },
    Withholding {
        category: WithholdingCategory,
        amount: Decimal,
    },
    Sscl {
        base_value: Decimal,
    },
    Installment {
        principal: Decimal,
        terms: LoanTerms,
        schedule: bool,
    },
    MaxLoan {
        max_payment: Decimal,
        terms: LoanTerms,
    },
}

impl Request {
    pub fn module(&self) -> Module {
        match self {
            Request::Payable { .. } => Module::Payable,
            Request::Income { .. } => Module::Income,
            Request::Withholding { .. } => Module::Withholding,
            Request::Sscl { .. } => Module::Sscl,
            Request::Installment { .. } | Request::MaxLoan { .. } => Module::Leasing,
        }
    }
}

/// Result of a calculation, ready for rendering or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Payable {
        /// Upper bound of the tax-free bracket.
        threshold: Option<Decimal>,
        result: TaxResult,
    },
    Income {
        threshold: Option<Decimal>,
        result: TaxResult,
    },
    Withholding {
        result: WithholdingResult,
    },
    Sscl {
        config: SsclConfig,
        result: SsclResult,
    },
    Installment {
        terms: LoanTerms,
        summary: LoanSummary,
        schedule: Vec<Installment>,
    },
    MaxLoan {
        terms: LoanTerms,
        max_payment: Decimal,
        principal: Decimal,
    },
}

impl Outcome {
    pub fn module(&self) -> Module {
        match self {
            Outcome::Payable { .. } => Module::Payable,
            Outcome::Income { .. } => Module::Income,
            Outcome::Withholding { .. } => Module::Withholding,
            Outcome::Sscl { .. } => Module::Sscl,
            Outcome::Installment { .. } | Outcome::MaxLoan { .. } => Module::Leasing,
        }
    }
}

/// Rate tables and settings shared by every calculation.
#[derive(Debug, Clone)]
pub struct Calculators {
    monthly: BracketTable,
    annual: BracketTable,
    sscl: SsclCalculator,
}

impl Default for Calculators {
    fn default() -> Self {
        Self {
            monthly: BracketTable::monthly(),
            annual: BracketTable::annual(),
            sscl: SsclCalculator::default(),
        }
    }
}

impl Calculators {
    pub fn new(
        monthly: BracketTable,
        annual: BracketTable,
        sscl: SsclCalculator,
    ) -> Self {
        Self {
            monthly,
            annual,
            sscl,
        }
    }

    /// Builds the calculators from `config`.
    ///
    /// `brackets` takes precedence over the config's bracket file. Without
    /// either, the built-in tables are used. A bracket file must define both
    /// the `monthly` and `annual` tables.
    pub fn from_config(
        config: &AppConfig,
        brackets: Option<&Path>,
    ) -> Result<Self, AppError> {
        let sscl = SsclCalculator::new(config.sscl)?;

        let Some(path) = brackets.or(config.brackets.as_deref()) else {
            debug!("using built-in bracket tables");
            return Ok(Self::new(BracketTable::monthly(), BracketTable::annual(), sscl));
        };

        let tables = BracketTableLoader::load_from_file(path)?;
        let monthly = tables
            .get(MONTHLY_TABLE)
            .cloned()
            .ok_or(AppError::MissingTable(MONTHLY_TABLE))?;
        let annual = tables
            .get(ANNUAL_TABLE)
            .cloned()
            .ok_or(AppError::MissingTable(ANNUAL_TABLE))?;
        info!(path = %path.display(), "using bracket tables from file");

        Ok(Self::new(monthly, annual, sscl))
    }

    pub fn monthly(&self) -> &BracketTable {
        &self.monthly
    }

    pub fn annual(&self) -> &BracketTable {
        &self.annual
    }
}

/// Dispatches `request` to its engine.
pub fn compute(
    calculators: &Calculators,
    request: &Request,
) -> Result<Outcome, AppError> {
    debug!(module = ?request.module(), "computing");

    let outcome = match *request {
        Request::Payable { salary } => Outcome::Payable {
            threshold: calculators.monthly.threshold(),
            result: SlabTaxCalculator::new(&calculators.monthly).calculate(salary),
        },
        Request::Income { income } => Outcome::Income {
            threshold: calculators.annual.threshold(),
            result: SlabTaxCalculator::new(&calculators.annual).calculate(income),
        },
        Request::Withholding { category, amount } => Outcome::Withholding {
            result: compute_withholding(category, amount),
        },
        Request::Sscl { base_value } => Outcome::Sscl {
            config: *calculators.sscl.config(),
            result: calculators.sscl.calculate(base_value)?,
        },
        Request::Installment {
            principal,
            terms,
            schedule,
        } => {
            let loan = LoanCalculator::new(terms);
            let summary = loan.summary(principal)?;
            let schedule = if schedule {
                loan.schedule(principal)?
            } else {
                Vec::new()
            };
            Outcome::Installment {
                terms,
                summary,
                schedule,
            }
        }
        Request::MaxLoan { max_payment, terms } => Outcome::MaxLoan {
            terms,
            max_payment,
            principal: LoanCalculator::new(terms).max_loan(max_payment)?,
        },
    };

    Ok(outcome)
}
