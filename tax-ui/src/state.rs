//! View state for the calculator.
//!
//! The state is a plain value owned by the caller and passed into the
//! renderers. Nothing here is global.

use crate::app::{Module, Outcome};

/// What is currently on screen: the selected module and, once the user has
/// submitted valid input, the outcome being shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active: Module,
    pub outcome: Option<Outcome>,
}

impl ViewState {
    /// Create a state with `active` selected and no results shown.
    pub fn new(active: Module) -> Self {
        Self {
            active,
            outcome: None,
        }
    }

    /// Shows `outcome`, making its module the active one.
    pub fn show(
        &mut self,
        outcome: Outcome,
    ) {
        self.active = outcome.module();
        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::app::{Calculators, Request, compute};

    fn sscl_outcome() -> Outcome {
        compute(
            &Calculators::default(),
            &Request::Sscl {
                base_value: dec!(1000),
            },
        )
        .expect("sscl never fails")
    }

    #[test]
    fn test_new_state_has_no_results() {
        let state = ViewState::new(Module::Income);

        assert_eq!(state.active, Module::Income);
        assert_eq!(state.outcome, None);
    }

    #[test]
    fn test_show_activates_outcome_module() {
        let mut state = ViewState::new(Module::Payable);

        state.show(sscl_outcome());

        assert_eq!(state.active, Module::Sscl);
        assert!(state.outcome.is_some());
    }

    #[test]
    fn test_show_replaces_previous_outcome() {
        let mut state = ViewState::default();
        state.show(sscl_outcome());
        let income = compute(
            &Calculators::default(),
            &Request::Income {
                income: dec!(1000000),
            },
        )
        .expect("income never fails");

        state.show(income);

        assert_eq!(state.active, Module::Income);
        assert!(matches!(state.outcome, Some(Outcome::Income { .. })));
    }
}
