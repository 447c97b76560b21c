use tax_core::calculations::{SsclConfig, SsclResult};
use tax_core::rate_label;

use super::table::TextTable;
use crate::utils::CurrencyFormat;

pub fn render(
    config: &SsclConfig,
    result: &SsclResult,
    currency: &CurrencyFormat,
) -> String {
    let mut table = TextTable::new(Vec::<String>::new());
    table.push_row(["Value".to_string(), currency.format(result.base_value)]);
    table.push_row([
        format!("Sale tax ({})", rate_label(config.sale_tax_rate)),
        currency.format(result.sale_tax),
    ]);
    table.push_row([
        "Value after sale tax".to_string(),
        currency.format(result.after_sale_tax),
    ]);
    table.push_row([
        format!("VAT ({})", rate_label(config.vat_rate)),
        currency.format(result.vat),
    ]);
    table.push_row(["Total SSCL".to_string(), currency.format(result.total)]);
    table.render()
}
