//! Command line definition and the glue from parsed arguments to rendered
//! output.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tax_core::calculations::LoanTerms;
use tracing::debug;

use crate::app::{Calculators, Module, Request, compute};
use crate::config::AppConfig;
use crate::input::{
    InputError, parse_category, parse_positive_amount, parse_rate_percent, parse_years,
};
use crate::state::ViewState;
use crate::views;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Sri Lankan payable, income, withholding and SSCL tax calculator, with a
/// leasing (loan installment) calculator.
#[derive(Debug, Parser)]
#[command(name = "TaxCalculator", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bracket table CSV overriding the built-in monthly and annual tables.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level or filter directive (e.g. `debug`, `tax_core=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Suppress log output on stderr. File logging is unaffected.
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Monthly payable tax (PAYE) on a salary.
    Payable {
        /// Monthly salary, e.g. `150000` or `1,50,000`.
        #[arg(allow_hyphen_values = true)]
        salary: String,
    },

    /// Annual income tax.
    Income {
        /// Annual assessable income.
        #[arg(allow_hyphen_values = true)]
        income: String,
    },

    /// Withholding tax on rent, bank interest or dividends.
    Withholding {
        /// One of `rent`, `interest` or `dividend`.
        #[arg(long, short)]
        category: Option<String>,

        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// SSCL with VAT on a sale value.
    Sscl {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Leasing calculator.
    Leasing {
        #[command(subcommand)]
        command: LeasingCommand,
    },

    /// Print the slab tables in use.
    Tables,

    /// List the calculator modules.
    Modules,
}

#[derive(Debug, Subcommand)]
pub enum LeasingCommand {
    /// Monthly installment for a loan amount.
    Installment {
        #[arg(long, allow_hyphen_values = true)]
        principal: String,

        /// Annual interest rate in percent.
        #[arg(long, allow_hyphen_values = true)]
        rate: String,

        #[arg(long, allow_hyphen_values = true)]
        years: String,

        /// Also print the month-by-month amortization schedule.
        #[arg(long)]
        schedule: bool,
    },

    /// Largest loan a monthly payment can service.
    MaxLoan {
        /// Monthly payment the borrower can afford.
        #[arg(long, allow_hyphen_values = true)]
        payment: String,

        /// Annual interest rate in percent.
        #[arg(long, allow_hyphen_values = true)]
        rate: String,

        #[arg(long, allow_hyphen_values = true)]
        years: String,
    },
}

impl Command {
    /// Validates the raw arguments into a [`Request`].
    ///
    /// Returns `Ok(None)` for commands that do not run a calculation.
    pub fn to_request(&self) -> Result<Option<Request>, InputError> {
        let request = match self {
            Command::Payable { salary } => Request::Payable {
                salary: parse_positive_amount("salary amount", salary)?,
            },
            Command::Income { income } => Request::Income {
                income: parse_positive_amount("income amount", income)?,
            },
            Command::Withholding { category, amount } => Request::Withholding {
                category: parse_category(category.as_deref())?,
                amount: parse_positive_amount("amount", amount)?,
            },
            Command::Sscl { value } => Request::Sscl {
                base_value: parse_positive_amount("value", value)?,
            },
            Command::Leasing { command } => command.to_request()?,
            Command::Tables | Command::Modules => return Ok(None),
        };
        Ok(Some(request))
    }
}

impl LeasingCommand {
    fn to_request(&self) -> Result<Request, InputError> {
        let request = match self {
            LeasingCommand::Installment {
                principal,
                rate,
                years,
                schedule,
            } => Request::Installment {
                principal: parse_positive_amount("loan amount", principal)?,
                terms: LoanTerms::new(parse_rate_percent(rate)?, parse_years(years)?),
                schedule: *schedule,
            },
            LeasingCommand::MaxLoan {
                payment,
                rate,
                years,
            } => Request::MaxLoan {
                max_payment: parse_positive_amount("monthly payment", payment)?,
                terms: LoanTerms::new(parse_rate_percent(rate)?, parse_years(years)?),
            },
        };
        Ok(request)
    }
}

// ─── execution ───────────────────────────────────────────────────────────────

/// Runs the parsed command against `config` and returns the text to print.
pub fn execute(
    cli: &Cli,
    config: &AppConfig,
) -> Result<String> {
    if let Command::Modules = cli.command {
        return render_modules(cli.format);
    }

    let calculators = Calculators::from_config(config, cli.brackets.as_deref())
        .context("failed to set up calculators")?;

    let Some(request) = cli.command.to_request()? else {
        return render_tables(&calculators, cli.format, config);
    };

    let outcome = compute(&calculators, &request)?;
    debug!(module = ?outcome.module(), "calculation finished");

    match cli.format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&outcome)?)),
        OutputFormat::Text => {
            let mut state = ViewState::new(request.module());
            state.show(outcome);
            Ok(views::render(&state, &config.currency))
        }
    }
}

fn render_modules(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let modules: Vec<_> = Module::all()
                .iter()
                .map(|module| {
                    json!({
                        "command": module.command(),
                        "title": module.title(),
                        "description": module.description(),
                    })
                })
                .collect();
            Ok(format!("{}\n", serde_json::to_string_pretty(&modules)?))
        }
        OutputFormat::Text => Ok(views::render_menu()),
    }
}

fn render_tables(
    calculators: &Calculators,
    format: OutputFormat,
    config: &AppConfig,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let tables = json!({
                "monthly": calculators.monthly(),
                "annual": calculators.annual(),
            });
            Ok(format!("{}\n", serde_json::to_string_pretty(&tables)?))
        }
        OutputFormat::Text => Ok(views::tables::render(
            calculators.monthly(),
            calculators.annual(),
            &config.currency,
        )),
    }
}
