mod tax_bracket;
mod tax_result;
mod withholding_category;

pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_result::{AppliedRates, BracketContribution, TaxResult, rate_label};
pub use withholding_category::{WithholdingCategory, WithholdingRule};
