//! Plain-text rendering of an evaluated scenario.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::calculations::BracketTax;

use crate::scenario_file::{Evaluation, ScenarioFile};

const LABEL_WIDTH: usize = 32;
const AMOUNT_WIDTH: usize = 14;

/// Renders a scenario via [`fmt::Display`].
pub struct Report<'a> {
    scenario: &'a ScenarioFile,
    evaluation: &'a Evaluation,
    breakdown: Option<Vec<BracketTax>>,
}

impl<'a> Report<'a> {
    pub fn new(
        scenario: &'a ScenarioFile,
        evaluation: &'a Evaluation,
    ) -> Self {
        Self {
            scenario,
            evaluation,
            breakdown: None,
        }
    }

    /// Adds a per-band table of the tax without top-up.
    pub fn with_breakdown(
        mut self,
        breakdown: Vec<BracketTax>,
    ) -> Self {
        self.breakdown = Some(breakdown);
        self
    }
}

fn amount_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(f, "  {label:<LABEL_WIDTH$}{amount:>AMOUNT_WIDTH$.2}")
}

fn rate_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    rate: String,
) -> fmt::Result {
    writeln!(f, "  {label:<LABEL_WIDTH$}{rate:>AMOUNT_WIDTH$}")
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).round_dp(2).normalize())
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let profile = &self.scenario.profile;
        let outcome = &self.evaluation.outcome;

        writeln!(f, "Taxpayer")?;
        writeln!(f, "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}", "Age", profile.age)?;
        writeln!(f, "  {:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}", "Gender", profile.gender)?;
        amount_line(f, "Total income", profile.total_income())?;
        amount_line(f, "Donation deduction", profile.donation_deduction())?;
        amount_line(f, "Assessable income", profile.assessable_income())?;

        writeln!(f)?;
        writeln!(f, "Reliefs")?;
        for claim in self.evaluation.bundle.claims() {
            if claim.kind.is_female_only() && !profile.gender.is_female() {
                continue;
            }
            amount_line(f, claim.kind.label(), claim.amount())?;
        }
        amount_line(f, "Total relief", outcome.total_relief)?;
        amount_line(f, "Room remaining", outcome.room_remaining)?;

        writeln!(f)?;
        writeln!(f, "Tax")?;
        let without = outcome.without_top_up();
        let with = outcome.with_top_up();
        amount_line(f, "Chargeable income", without.chargeable_income)?;
        amount_line(f, "Tax payable", without.tax_payable)?;
        rate_line(f, "Marginal rate", percent(self.evaluation.marginal_rate))?;
        let effective = self
            .evaluation
            .effective_rate
            .map_or_else(|| "n/a".to_string(), percent);
        rate_line(f, "Effective rate", effective)?;
        amount_line(f, "Top-up applied", outcome.applied_top_up)?;
        amount_line(f, "Chargeable income with top-up", with.chargeable_income)?;
        amount_line(f, "Tax payable with top-up", with.tax_payable)?;
        amount_line(f, "Tax savings", outcome.tax_savings)?;
        let savings = outcome
            .percentage_savings()
            .map_or_else(|| "n/a".to_string(), |p| format!("{}%", p.round_dp(2)));
        rate_line(f, "Percentage savings", savings)?;

        if let Some(breakdown) = &self.breakdown {
            writeln!(f)?;
            writeln!(f, "Bands")?;
            for band in breakdown {
                let rate = percent(band.tax_rate);
                let range = match band.max_income {
                    Some(max) => format!("{} - {max} @ {rate}", band.min_income),
                    None => format!("{}+ @ {rate}", band.min_income),
                };
                amount_line(f, &range, band.tax)?;
            }
        }

        Ok(())
    }
}
