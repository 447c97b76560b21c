use rust_decimal::Decimal;
use tax_core::{TaxResult, rate_label};

use super::table::TextTable;
use crate::utils::{CurrencyFormat, format_grouped};

/// Labels that differ between the payable (salary) and income views.
#[derive(Debug, Clone, Copy)]
pub struct SlabLabels {
    pub amount: &'static str,
    pub net: &'static str,
}

pub const PAYABLE_LABELS: SlabLabels = SlabLabels {
    amount: "Salary",
    net: "Net salary",
};

pub const INCOME_LABELS: SlabLabels = SlabLabels {
    amount: "Income",
    net: "Net income",
};

/// Renders a slab computation: totals, applied rates and the per-bracket
/// breakdown.
pub fn render(
    labels: SlabLabels,
    threshold: Option<Decimal>,
    result: &TaxResult,
    currency: &CurrencyFormat,
) -> String {
    let mut summary = TextTable::new(Vec::<String>::new());
    summary.push_row([labels.amount.to_string(), currency.format(result.amount)]);
    summary.push_row(["Tax".to_string(), currency.format(result.total_tax)]);
    summary.push_row([labels.net.to_string(), currency.format(result.net_amount)]);
    summary.push_row(["Rates applied".to_string(), result.applied_rates.to_string()]);

    let mut out = summary.render();
    out.push('\n');

    if result.breakdown.is_empty() {
        match threshold {
            Some(threshold) => out.push_str(&format!(
                "No tax applied (below {} threshold).\n",
                currency.format(threshold)
            )),
            None => out.push_str("No tax applied.\n"),
        }
        return out;
    }

    let mut breakdown = TextTable::new(["Range", "Taxable", "Rate", "Tax"]);
    for row in &result.breakdown {
        breakdown.push_row([
            format!(
                "{} - {}",
                format_grouped(row.lower_bound, currency.grouping),
                format_grouped(row.upper_bound, currency.grouping)
            ),
            currency.format(row.taxable_amount),
            rate_label(row.rate),
            currency.format(row.tax),
        ]);
    }
    out.push_str(&breakdown.render());
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::BracketTable;
    use tax_core::calculations::compute_slab_tax;

    use super::*;
    use crate::utils::Grouping;

    #[test]
    fn test_payable_breakdown() {
        let result = compute_slab_tax(dec!(150000), &BracketTable::monthly());

        let text = render(
            PAYABLE_LABELS,
            Some(dec!(100000)),
            &result,
            &CurrencyFormat::default(),
        );

        assert_eq!(
            text,
            "Salary         LKR 1,50,000.00\n\
             Tax               LKR 3,499.98\n\
             Net salary     LKR 1,46,500.02\n\
             Rates applied      0%, 6%, 12%\n\
             \n\
             Range                            Taxable  Rate           Tax\n\
             ------------------------------------------------------------\n\
             1,00,000.00 - 1,41,667.00  LKR 41,667.00    6%  LKR 2,500.02\n\
             1,41,667.00 - 1,50,000.00   LKR 8,333.00   12%    LKR 999.96\n"
        );
    }

    #[test]
    fn test_below_threshold_message() {
        let result = compute_slab_tax(dec!(80000), &BracketTable::monthly());

        let text = render(
            PAYABLE_LABELS,
            Some(dec!(100000)),
            &result,
            &CurrencyFormat::default(),
        );

        assert!(text.contains("No tax applied (below LKR 1,00,000.00 threshold)."));
        assert!(!text.contains("Range"));
    }

    #[test]
    fn test_income_labels_and_western_grouping() {
        let result = compute_slab_tax(dec!(2000000), &BracketTable::annual());
        let currency = CurrencyFormat {
            code: "LKR".to_string(),
            grouping: Grouping::Western,
        };

        let text = render(INCOME_LABELS, Some(dec!(1200000)), &result, &currency);

        assert!(text.contains("Income"));
        assert!(text.contains("Net income"));
        assert!(text.contains("LKR 66,000.00"));
        assert!(text.contains("1,200,000.00 - 1,700,000.00"));
    }
}
