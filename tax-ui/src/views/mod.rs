//! Plain-text renderers, one per calculator module.
//!
//! Renderers are pure functions of the [`ViewState`] and the currency
//! format; they return the text to print and never touch global state.

pub mod leasing;
pub mod slab;
pub mod sscl;
pub mod table;
pub mod tables;
pub mod withholding;

use crate::app::{Module, Outcome};
use crate::state::ViewState;
use crate::utils::CurrencyFormat;

/// Renders the module heading followed by the outcome, if any.
pub fn render(
    state: &ViewState,
    currency: &CurrencyFormat,
) -> String {
    let mut out = format!("{}\n{}\n", state.active.title(), state.active.description());

    if let Some(outcome) = &state.outcome {
        out.push('\n');
        out.push_str(&render_outcome(outcome, currency));
    }
    out
}

/// One line per module: the subcommand that opens it, its title and what it
/// calculates.
pub fn render_menu() -> String {
    let width = Module::all()
        .iter()
        .map(|module| module.command().len())
        .max()
        .unwrap_or_default();

    Module::all()
        .iter()
        .map(|module| {
            format!(
                "{:<width$}  {}: {}\n",
                module.command(),
                module.title(),
                module.description()
            )
        })
        .collect()
}

pub fn render_outcome(
    outcome: &Outcome,
    currency: &CurrencyFormat,
) -> String {
    match outcome {
        Outcome::Payable { threshold, result } => {
            slab::render(slab::PAYABLE_LABELS, *threshold, result, currency)
        }
        Outcome::Income { threshold, result } => {
            slab::render(slab::INCOME_LABELS, *threshold, result, currency)
        }
        Outcome::Withholding { result } => withholding::render(result, currency),
        Outcome::Sscl { config, result } => sscl::render(config, result, currency),
        Outcome::Installment {
            terms,
            summary,
            schedule,
        } => leasing::render_installment(terms, summary, schedule, currency),
        Outcome::MaxLoan {
            terms,
            max_payment,
            principal,
        } => leasing::render_max_loan(terms, *max_payment, *principal, currency),
    }
}
