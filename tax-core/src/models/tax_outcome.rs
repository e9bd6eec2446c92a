use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Chargeable income and the tax on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxOutcome {
    pub chargeable_income: Decimal,
    pub tax_payable: Decimal,
}

/// Total of the ordinary reliefs after the global cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReliefSummary {
    /// Sum of applicable reliefs, at most the global relief cap.
    pub total_relief: Decimal,
    /// Headroom under the global cap available for top-up relief.
    pub room_remaining: Decimal,
}

/// Tax with and without a discretionary top-up relief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub total_relief: Decimal,
    pub room_remaining: Decimal,
    /// Top-up after clamping to `[0, room_remaining]`.
    pub applied_top_up: Decimal,

    pub chargeable_income: Decimal,
    pub tax_payable: Decimal,

    pub chargeable_income_with_top_up: Decimal,
    pub tax_payable_with_top_up: Decimal,

    pub tax_savings: Decimal,
}

impl ScenarioOutcome {
    pub fn without_top_up(&self) -> TaxOutcome {
        TaxOutcome {
            chargeable_income: self.chargeable_income,
            tax_payable: self.tax_payable,
        }
    }

    pub fn with_top_up(&self) -> TaxOutcome {
        TaxOutcome {
            chargeable_income: self.chargeable_income_with_top_up,
            tax_payable: self.tax_payable_with_top_up,
        }
    }

    /// Savings as a percentage of the tax without top-up.
    ///
    /// `None` when there is no tax to save.
    pub fn percentage_savings(&self) -> Option<Decimal> {
        if self.tax_payable.is_zero() {
            return None;
        }
        Some(self.tax_savings / self.tax_payable * dec!(100))
    }
}
