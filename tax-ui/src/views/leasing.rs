use rust_decimal::Decimal;
use tax_core::calculations::{Installment, LoanSummary, LoanTerms};

use super::table::TextTable;
use crate::utils::{CurrencyFormat, format_grouped};

fn rate_text(terms: &LoanTerms) -> String {
    format!("{}% per year", terms.annual_rate_percent.normalize())
}

fn term_text(terms: &LoanTerms) -> String {
    let years = terms.years.normalize();
    let unit = if years == Decimal::ONE { "year" } else { "years" };
    match terms.number_of_payments() {
        Ok(payments) => format!("{years} {unit} ({payments} payments)"),
        Err(_) => format!("{years} {unit}"),
    }
}

pub fn render_installment(
    terms: &LoanTerms,
    summary: &LoanSummary,
    schedule: &[Installment],
    currency: &CurrencyFormat,
) -> String {
    let mut table = TextTable::new(Vec::<String>::new());
    table.push_row(["Loan amount".to_string(), currency.format(summary.principal)]);
    table.push_row(["Interest rate".to_string(), rate_text(terms)]);
    table.push_row(["Term".to_string(), term_text(terms)]);
    table.push_row([
        "Monthly installment".to_string(),
        currency.format(summary.monthly_installment),
    ]);
    table.push_row(["Total payment".to_string(), currency.format(summary.total_payment)]);
    table.push_row(["Total interest".to_string(), currency.format(summary.total_interest)]);

    let mut out = table.render();
    if schedule.is_empty() {
        return out;
    }

    let grouping = currency.grouping;
    let mut rows = TextTable::new(["Month", "Payment", "Interest", "Principal", "Balance"]);
    for row in schedule {
        rows.push_row([
            row.period.to_string(),
            format_grouped(row.payment, grouping),
            format_grouped(row.interest, grouping),
            format_grouped(row.principal, grouping),
            format_grouped(row.balance, grouping),
        ]);
    }
    out.push('\n');
    out.push_str(&rows.render());
    out
}

pub fn render_max_loan(
    terms: &LoanTerms,
    max_payment: Decimal,
    principal: Decimal,
    currency: &CurrencyFormat,
) -> String {
    let mut table = TextTable::new(Vec::<String>::new());
    table.push_row(["Monthly payment".to_string(), currency.format(max_payment)]);
    table.push_row(["Interest rate".to_string(), rate_text(terms)]);
    table.push_row(["Term".to_string(), term_text(terms)]);
    table.push_row(["Maximum loan amount".to_string(), currency.format(principal)]);
    table.render()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::calculations::LoanCalculator;

    use super::*;

    #[test]
    fn test_installment_summary() {
        let terms = LoanTerms::new(dec!(12), dec!(3));
        let summary = LoanCalculator::new(terms)
            .summary(dec!(100000))
            .expect("summary should compute");

        let text = render_installment(&terms, &summary, &[], &CurrencyFormat::default());

        assert_eq!(
            text,
            "Loan amount                LKR 1,00,000.00\n\
             Interest rate                 12% per year\n\
             Term                 3 years (36 payments)\n\
             Monthly installment           LKR 3,321.43\n\
             Total payment              LKR 1,19,571.52\n\
             Total interest               LKR 19,571.52\n"
        );
    }

    #[test]
    fn test_installment_with_schedule() {
        let terms = LoanTerms::new(dec!(12), dec!(1));
        let calculator = LoanCalculator::new(terms);
        let summary = calculator.summary(dec!(12000)).expect("summary");
        let schedule = calculator.schedule(dec!(12000)).expect("schedule");

        let text = render_installment(&terms, &summary, &schedule, &CurrencyFormat::default());

        assert!(text.contains("1 year (12 payments)"));
        assert!(text.contains("Month"));
        assert!(text.lines().any(|line| line.starts_with("12 ") && line.ends_with(" 0.00")));
        // Header, rule and one line per month after the summary.
        assert_eq!(text.lines().count(), 6 + 1 + 2 + 12);
    }

    #[test]
    fn test_fractional_term() {
        let terms = LoanTerms::new(dec!(12), dec!(1.50));
        let summary = LoanCalculator::new(terms)
            .summary(dec!(18000))
            .expect("summary should compute");

        let text = render_installment(&terms, &summary, &[], &CurrencyFormat::default());

        assert!(text.contains("1.5 years (18 payments)"), "text:\n{text}");
    }

    #[test]
    fn test_max_loan() {
        let terms = LoanTerms::new(dec!(12), dec!(1));

        let text = render_max_loan(
            &terms,
            dec!(10000),
            dec!(112550.7747),
            &CurrencyFormat::default(),
        );

        assert!(text.contains("Maximum loan amount"));
        assert!(text.contains("LKR 1,12,550.77"));
        assert!(text.contains("LKR 10,000.00"));
    }
}
