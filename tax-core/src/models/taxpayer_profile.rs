use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::Gender;

/// Approved donations are deducted at 250% of the amount donated.
pub const DONATION_MULTIPLIER: Decimal = dec!(2.5);

/// Raw personal and income figures for one year of assessment.
///
/// Only the inputs are stored; every income subtotal is derived on demand
/// so the struct can never hold an inconsistent total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxpayerProfile {
    pub age: u32,
    pub is_handicapped: bool,
    pub gender: Gender,

    /// Ordinary wages for the year (salary, excluding bonus).
    pub employment_income: Decimal,
    /// Additional wages (bonus) for the year.
    pub bonus: Decimal,
    /// Allowable employment expenses.
    pub business_expenses: Decimal,
    /// Rental, trade and other non-employment income.
    pub other_income: Decimal,
    /// Approved donations made during the preceding year.
    pub approved_donations: Decimal,
}

impl TaxpayerProfile {
    /// Employment income plus bonus.
    pub fn annual_wage(&self) -> Decimal {
        self.employment_income + self.bonus
    }

    /// Annual wage less employment expenses.
    pub fn net_employment_income(&self) -> Decimal {
        self.annual_wage() - self.business_expenses
    }

    pub fn total_income(&self) -> Decimal {
        self.net_employment_income() + self.other_income
    }

    pub fn donation_deduction(&self) -> Decimal {
        self.approved_donations * DONATION_MULTIPLIER
    }

    /// Total income less the donation deduction.
    ///
    /// This can go negative when donations exceed income; consumers clamp
    /// it to zero where a non-negative figure is required.
    pub fn assessable_income(&self) -> Decimal {
        self.total_income() - self.donation_deduction()
    }
}
