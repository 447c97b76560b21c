use rust_decimal::Decimal;
use tax_core::{BracketTable, rate_label};

use super::table::TextTable;
use crate::utils::{CurrencyFormat, format_grouped};

/// Lists the bands of one bracket table under `title`.
pub fn render_table(
    title: &str,
    table: &BracketTable,
    currency: &CurrencyFormat,
) -> String {
    let mut rows = TextTable::new(["Band", "Rate"]);
    let mut lower = Decimal::ZERO;

    for bracket in table.brackets() {
        let band = match bracket.upper_bound {
            Some(upper) if lower.is_zero() => {
                format!("Up to {}", format_grouped(upper, currency.grouping))
            }
            Some(upper) => format!(
                "{} - {}",
                format_grouped(lower, currency.grouping),
                format_grouped(upper, currency.grouping)
            ),
            None => format!("Above {}", format_grouped(lower, currency.grouping)),
        };
        rows.push_row([band, rate_label(bracket.rate)]);
        lower = bracket.upper_bound.unwrap_or(lower);
    }

    format!("{title}\n{}", rows.render())
}

pub fn render(
    monthly: &BracketTable,
    annual: &BracketTable,
    currency: &CurrencyFormat,
) -> String {
    format!(
        "{}\n{}",
        render_table("Monthly (Payable Tax)", monthly, currency),
        render_table("Annual (Income Tax)", annual, currency)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::TaxBracket;

    use super::*;
    use crate::utils::Grouping;

    #[test]
    fn test_small_table() {
        let table = BracketTable::new(vec![
            TaxBracket::bounded(dec!(1000), dec!(0)),
            TaxBracket::bounded(dec!(5000), dec!(0.1)),
            TaxBracket::unbounded(dec!(0.2)),
        ])
        .expect("valid table");
        let currency = CurrencyFormat {
            code: String::new(),
            grouping: Grouping::Western,
        };

        let text = render_table("Test", &table, &currency);

        assert_eq!(
            text,
            "Test\n\
             Band                 Rate\n\
             -------------------------\n\
             Up to 1,000.00         0%\n\
             1,000.00 - 5,000.00   10%\n\
             Above 5,000.00        20%\n"
        );
    }

    #[test]
    fn test_builtin_tables() {
        let text = render(
            &BracketTable::monthly(),
            &BracketTable::annual(),
            &CurrencyFormat::default(),
        );

        assert!(text.contains("Monthly (Payable Tax)"));
        assert!(text.contains("Up to 1,00,000.00"));
        assert!(text.contains("Above 3,08,333.00"));
        assert!(text.contains("Annual (Income Tax)"));
        assert!(text.contains("Above 37,00,000.00"));
        assert_eq!(text.matches("36%").count(), 2);
    }
}
