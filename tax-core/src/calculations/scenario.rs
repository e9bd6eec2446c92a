//! Chargeable income and tax with and without a top-up relief.
//!
//! # Steps
//!
//! | Step | Value |
//! |------|-------|
//! | 1 | Total relief and room remaining ([`aggregate_reliefs`]) |
//! | 2 | Chargeable income: `max(income - total relief, 0)` |
//! | 3 | Tax payable on step 2 |
//! | 4 | Applied top-up: requested top-up clamped to `[0, room remaining]` |
//! | 5 | Chargeable income with top-up: `max(income - total relief - top-up, 0)` |
//! | 6 | Tax payable on step 5 |
//! | 7 | Tax savings: `max(step 3 - step 6, 0)` |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::compose_scenario;
//! use tax_core::{Gender, ReliefBundle};
//!
//! let outcome = compose_scenario(dec!(100000), &ReliefBundle::empty(), Gender::Male, dec!(0));
//!
//! assert_eq!(outcome.chargeable_income, dec!(100000));
//! assert_eq!(outcome.tax_payable, dec!(5650.00));
//! assert_eq!(outcome.tax_savings, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::aggregator::aggregate_reliefs;
use crate::calculations::common::{clamp, non_negative};
use crate::calculations::progressive_tax::ProgressiveTax;
use crate::{
    BracketTable, Gender, ReliefBundle, ReliefRequest, ScenarioOutcome, TaxOutcome,
    TaxpayerProfile,
};

/// Runs scenarios against a borrowed [`BracketTable`].
#[derive(Debug, Clone, Copy)]
pub struct ScenarioComposer<'a> {
    tax: ProgressiveTax<'a>,
}

impl<'a> ScenarioComposer<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self {
            tax: ProgressiveTax::new(table),
        }
    }

    pub fn tax(&self) -> ProgressiveTax<'a> {
        self.tax
    }

    /// Composes both outcomes for `income` (normally assessable income).
    pub fn compose(
        &self,
        income: Decimal,
        bundle: &ReliefBundle,
        gender: Gender,
        top_up: Decimal,
    ) -> ScenarioOutcome {
        let summary = aggregate_reliefs(bundle, gender);

        let without = self.outcome(income, summary.total_relief);

        let applied_top_up = clamp(top_up, Decimal::ZERO, summary.room_remaining);
        let with = self.outcome(income, summary.total_relief + applied_top_up);

        let tax_savings = non_negative(without.tax_payable - with.tax_payable);

        debug!(
            %income,
            total_relief = %summary.total_relief,
            %applied_top_up,
            tax_payable = %without.tax_payable,
            tax_payable_with_top_up = %with.tax_payable,
            %tax_savings,
            "scenario composed"
        );

        ScenarioOutcome {
            total_relief: summary.total_relief,
            room_remaining: summary.room_remaining,
            applied_top_up,
            chargeable_income: without.chargeable_income,
            tax_payable: without.tax_payable,
            chargeable_income_with_top_up: with.chargeable_income,
            tax_payable_with_top_up: with.tax_payable,
            tax_savings,
        }
    }

    /// Builds the relief bundle for `profile` and composes the scenario on
    /// its assessable income.
    pub fn evaluate_profile(
        &self,
        profile: &TaxpayerProfile,
        request: &ReliefRequest,
        top_up: Decimal,
    ) -> ScenarioOutcome {
        let assessable_income = profile.assessable_income();
        debug!(
            annual_wage = %profile.annual_wage(),
            total_income = %profile.total_income(),
            %assessable_income,
            "income derived"
        );

        let bundle = ReliefBundle::from_profile(profile, request);
        self.compose(assessable_income, &bundle, profile.gender, top_up)
    }

    fn outcome(
        &self,
        income: Decimal,
        applied_relief: Decimal,
    ) -> TaxOutcome {
        let chargeable_income = non_negative(income - applied_relief);
        TaxOutcome {
            chargeable_income,
            tax_payable: self.tax.calculate(chargeable_income),
        }
    }
}

/// [`ScenarioComposer::compose`] against the Singapore resident rates.
pub fn compose_scenario(
    income: Decimal,
    bundle: &ReliefBundle,
    gender: Gender,
    top_up: Decimal,
) -> ScenarioOutcome {
    ScenarioComposer::new(BracketTable::singapore()).compose(income, bundle, gender, top_up)
}

/// [`ScenarioComposer::evaluate_profile`] against the Singapore resident rates.
pub fn evaluate_profile(
    profile: &TaxpayerProfile,
    request: &ReliefRequest,
    top_up: Decimal,
) -> ScenarioOutcome {
    ScenarioComposer::new(BracketTable::singapore()).evaluate_profile(profile, request, top_up)
}
