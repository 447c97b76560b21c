use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a sequence of brackets does not partition `[0, ∞)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table must contain at least one bracket")]
    Empty,

    #[error("first bracket upper bound must be positive, got {0}")]
    NonPositiveFirstBound(Decimal),

    #[error("bracket {index} upper bound {bound} does not exceed previous bound {previous}")]
    NotIncreasing {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    #[error("last bracket must be unbounded, got upper bound {0}")]
    BoundedFinalBracket(Decimal),

    #[error("bracket {index} rate must be in [0, 1), got {rate}")]
    InvalidRate { index: usize, rate: Decimal },
}

/// A single tax bracket covering `(previous upper bound, upper_bound]`.
///
/// `upper_bound` is `None` for the open top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// An ordered, validated sequence of [`TaxBracket`]s.
///
/// Bounds are strictly increasing and only the final bracket is unbounded, so
/// the table partitions `[0, ∞)` into contiguous ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Builds a table after checking the partition invariant.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        validate(&brackets)?;
        Ok(Self { brackets })
    }

    /// The monthly payable tax table (tax-free threshold 100,000).
    pub fn monthly() -> Self {
        Self {
            brackets: vec![
                TaxBracket::bounded(dec!(100000), dec!(0.00)),
                TaxBracket::bounded(dec!(141667), dec!(0.06)),
                TaxBracket::bounded(dec!(183333), dec!(0.12)),
                TaxBracket::bounded(dec!(225000), dec!(0.18)),
                TaxBracket::bounded(dec!(266667), dec!(0.24)),
                TaxBracket::bounded(dec!(308333), dec!(0.30)),
                TaxBracket::unbounded(dec!(0.36)),
            ],
        }
    }

    /// The annual income tax table (tax-free threshold 1,200,000).
    ///
    /// These bounds are the statutory annual figures, not the monthly table
    /// scaled by twelve.
    pub fn annual() -> Self {
        Self {
            brackets: vec![
                TaxBracket::bounded(dec!(1200000), dec!(0.00)),
                TaxBracket::bounded(dec!(1700000), dec!(0.06)),
                TaxBracket::bounded(dec!(2200000), dec!(0.12)),
                TaxBracket::bounded(dec!(2700000), dec!(0.18)),
                TaxBracket::bounded(dec!(3200000), dec!(0.24)),
                TaxBracket::bounded(dec!(3700000), dec!(0.30)),
                TaxBracket::unbounded(dec!(0.36)),
            ],
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The first bracket; a validated table always has one.
    pub fn first(&self) -> &TaxBracket {
        &self.brackets[0]
    }

    /// Upper bound of the first bracket, i.e. the tax-free threshold when its
    /// rate is zero.
    pub fn threshold(&self) -> Option<Decimal> {
        self.first().upper_bound
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

fn validate(brackets: &[TaxBracket]) -> Result<(), BracketTableError> {
    let last_index = match brackets.len() {
        0 => return Err(BracketTableError::Empty),
        len => len - 1,
    };

    let mut previous: Option<Decimal> = None;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
            return Err(BracketTableError::InvalidRate {
                index,
                rate: bracket.rate,
            });
        }

        match bracket.upper_bound {
            None if index != last_index => {
                return Err(BracketTableError::UnboundedBeforeEnd(index));
            }
            None => {}
            Some(bound) if index == last_index => {
                return Err(BracketTableError::BoundedFinalBracket(bound));
            }
            Some(bound) => {
                match previous {
                    None if bound <= Decimal::ZERO => {
                        return Err(BracketTableError::NonPositiveFirstBound(bound));
                    }
                    Some(prev) if bound <= prev => {
                        return Err(BracketTableError::NotIncreasing {
                            index,
                            bound,
                            previous: prev,
                        });
                    }
                    _ => {}
                }
                previous = Some(bound);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_tables_satisfy_invariant() {
        for table in [BracketTable::monthly(), BracketTable::annual()] {
            let rebuilt = BracketTable::new(table.brackets().to_vec());

            assert_eq!(rebuilt, Ok(table));
        }
    }

    #[test]
    fn builtin_tables_have_seven_brackets() {
        assert_eq!(BracketTable::monthly().len(), 7);
        assert_eq!(BracketTable::annual().len(), 7);
    }

    #[test]
    fn builtin_thresholds() {
        assert_eq!(BracketTable::monthly().threshold(), Some(dec!(100000)));
        assert_eq!(BracketTable::annual().threshold(), Some(dec!(1200000)));
    }

    #[test]
    fn annual_table_is_not_monthly_times_twelve() {
        let monthly = BracketTable::monthly();
        let annual = BracketTable::annual();

        let scaled = monthly.brackets()[1].upper_bound.map(|b| b * dec!(12));

        assert_eq!(scaled, Some(dec!(1700004)));
        assert_eq!(annual.brackets()[1].upper_bound, Some(dec!(1700000)));
    }

    #[test]
    fn single_unbounded_bracket_is_valid() {
        let table = BracketTable::new(vec![TaxBracket::unbounded(dec!(0.10))]);

        assert!(table.is_ok());
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(BracketTable::new(vec![]), Err(BracketTableError::Empty));
    }

    #[test]
    fn rejects_bounded_final_bracket() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(100), dec!(0)),
            TaxBracket::bounded(dec!(200), dec!(0.1)),
        ]);

        assert_eq!(result, Err(BracketTableError::BoundedFinalBracket(dec!(200))));
    }

    #[test]
    fn rejects_unbounded_middle_bracket() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(100), dec!(0)),
            TaxBracket::unbounded(dec!(0.1)),
            TaxBracket::unbounded(dec!(0.2)),
        ]);

        assert_eq!(result, Err(BracketTableError::UnboundedBeforeEnd(1)));
    }

    #[test]
    fn rejects_non_increasing_bounds() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(100), dec!(0)),
            TaxBracket::bounded(dec!(100), dec!(0.1)),
            TaxBracket::unbounded(dec!(0.2)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::NotIncreasing {
                index: 1,
                bound: dec!(100),
                previous: dec!(100),
            })
        );
    }

    #[test]
    fn rejects_non_positive_first_bound() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(0), dec!(0)),
            TaxBracket::unbounded(dec!(0.1)),
        ]);

        assert_eq!(result, Err(BracketTableError::NonPositiveFirstBound(dec!(0))));
    }

    #[test]
    fn rejects_rate_of_one_or_more() {
        let result = BracketTable::new(vec![
            TaxBracket::bounded(dec!(100), dec!(0)),
            TaxBracket::unbounded(dec!(1.0)),
        ]);

        assert_eq!(
            result,
            Err(BracketTableError::InvalidRate {
                index: 1,
                rate: dec!(1.0),
            })
        );
    }

    #[test]
    fn rejects_negative_rate() {
        let result = BracketTable::new(vec![TaxBracket::unbounded(dec!(-0.05))]);

        assert_eq!(
            result,
            Err(BracketTableError::InvalidRate {
                index: 0,
                rate: dec!(-0.05),
            })
        );
    }
}
