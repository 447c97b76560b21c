use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithholdingCategory {
    Rent,
    Interest,
    Dividend,
}

impl WithholdingCategory {
    pub fn all() -> &'static [WithholdingCategory] {
        &[
            WithholdingCategory::Rent,
            WithholdingCategory::Interest,
            WithholdingCategory::Dividend,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Interest => "interest",
            Self::Dividend => "dividend",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rent" => Some(Self::Rent),
            "interest" => Some(Self::Interest),
            "dividend" => Some(Self::Dividend),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rent => "Rent Tax",
            Self::Interest => "Bank Interest Tax",
            Self::Dividend => "Dividend Tax",
        }
    }

    /// Rate and tax-free threshold applied to this category.
    pub fn rule(&self) -> WithholdingRule {
        match self {
            Self::Rent => WithholdingRule {
                rate: dec!(0.10),
                threshold: dec!(100000),
            },
            Self::Interest => WithholdingRule {
                rate: dec!(0.05),
                threshold: Decimal::ZERO,
            },
            Self::Dividend => WithholdingRule {
                rate: dec!(0.14),
                threshold: dec!(100000),
            },
        }
    }
}

/// Flat rate charged on the part of an amount above `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingRule {
    pub rate: Decimal,
    pub threshold: Decimal,
}
