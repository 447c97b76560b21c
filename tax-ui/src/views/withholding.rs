use tax_core::calculations::WithholdingResult;
use tax_core::rate_label;

use super::table::TextTable;
use crate::utils::CurrencyFormat;

pub fn render(
    result: &WithholdingResult,
    currency: &CurrencyFormat,
) -> String {
    let rule = result.category.rule();

    let mut table = TextTable::new(Vec::<String>::new());
    table.push_row(["Category".to_string(), result.category.label().to_string()]);
    table.push_row(["Amount".to_string(), currency.format(result.amount)]);
    table.push_row(["Tax-free threshold".to_string(), currency.format(rule.threshold)]);
    table.push_row(["Taxable amount".to_string(), currency.format(result.taxable_amount)]);
    table.push_row(["Rate".to_string(), rate_label(result.rate)]);
    table.push_row(["Tax".to_string(), currency.format(result.tax)]);
    table.render()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::WithholdingCategory;
    use tax_core::calculations::compute_withholding;

    use super::*;

    #[test]
    fn test_rent_above_threshold() {
        let result = compute_withholding(WithholdingCategory::Rent, dec!(150000));

        let text = render(&result, &CurrencyFormat::default());

        assert_eq!(
            text,
            "Category                   Rent Tax\n\
             Amount              LKR 1,50,000.00\n\
             Tax-free threshold  LKR 1,00,000.00\n\
             Taxable amount        LKR 50,000.00\n\
             Rate                            10%\n\
             Tax                    LKR 5,000.00\n"
        );
    }

    #[test]
    fn test_interest_taxed_in_full() {
        let result = compute_withholding(WithholdingCategory::Interest, dec!(50000));

        let text = render(&result, &CurrencyFormat::default());

        assert!(text.contains("Bank Interest Tax"));
        assert!(text.contains("LKR 0.00"));
        assert!(text.contains("5%"));
        assert!(text.contains("LKR 2,500.00"));
    }
}
