//! TOML description of one taxpayer scenario.
//!
//! ```toml
//! top_up = 8000
//!
//! [profile]
//! age = 35
//! gender = "female"
//! employment_income = 72000
//!
//! [reliefs]
//! child = 4000
//! child_count = 1
//! nsman = 750
//! ```
//!
//! Every key is optional. The NSman relief is written as its dollar amount
//! and must be one of the scheme's tiers.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{
    NsmanRelief, ReliefBundle, ReliefError, ReliefRequest, ScenarioComposer, ScenarioOutcome,
    TaxpayerProfile,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScenarioFileError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    InvalidNsmanAmount(#[from] ReliefError),
}

/// A scenario ready to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScenarioFile {
    pub profile: TaxpayerProfile,
    pub reliefs: ReliefRequest,
    pub top_up: Decimal,
}

/// The relief bundle built for a scenario and the resulting outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub bundle: ReliefBundle,
    pub outcome: ScenarioOutcome,
    /// Rate of the band holding the chargeable income before top-up.
    pub marginal_rate: Decimal,
    /// Tax over chargeable income before top-up, `None` when nothing is chargeable.
    pub effective_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawScenario {
    profile: TaxpayerProfile,
    reliefs: RawReliefs,
    top_up: Decimal,
}

/// Mirrors [`ReliefRequest`] with the NSman tier as a plain amount.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawReliefs {
    spouse: Decimal,
    spouse_is_handicapped: bool,
    child: Decimal,
    child_count: u32,
    handicapped_child_count: u32,
    working_mother_child: Decimal,
    parent: Decimal,
    parent_is_handicapped: bool,
    parent_stays_together: bool,
    grandparent_caregiver: Decimal,
    handicapped_sibling: Decimal,
    handicapped_sibling_count: u32,
    life_insurance: Decimal,
    course_fee: Decimal,
    nsman: Decimal,
}

impl TryFrom<RawReliefs> for ReliefRequest {
    type Error = ReliefError;

    fn try_from(raw: RawReliefs) -> Result<Self, Self::Error> {
        Ok(ReliefRequest {
            spouse: raw.spouse,
            spouse_is_handicapped: raw.spouse_is_handicapped,
            child: raw.child,
            child_count: raw.child_count,
            handicapped_child_count: raw.handicapped_child_count,
            working_mother_child: raw.working_mother_child,
            parent: raw.parent,
            parent_is_handicapped: raw.parent_is_handicapped,
            parent_stays_together: raw.parent_stays_together,
            grandparent_caregiver: raw.grandparent_caregiver,
            handicapped_sibling: raw.handicapped_sibling,
            handicapped_sibling_count: raw.handicapped_sibling_count,
            life_insurance: raw.life_insurance,
            course_fee: raw.course_fee,
            nsman: NsmanRelief::from_amount(raw.nsman)?,
        })
    }
}

impl ScenarioFile {
    pub fn load_from_str(content: &str) -> Result<Self, ScenarioFileError> {
        let raw: RawScenario = toml::from_str(content)?;

        let scenario = ScenarioFile {
            profile: raw.profile,
            reliefs: raw.reliefs.try_into()?,
            top_up: raw.top_up,
        };
        debug!(
            age = scenario.profile.age,
            gender = %scenario.profile.gender,
            top_up = %scenario.top_up,
            "scenario parsed"
        );

        Ok(scenario)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ScenarioFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    /// Same scenario with a different top-up.
    pub fn with_top_up(
        mut self,
        top_up: Decimal,
    ) -> Self {
        self.top_up = top_up;
        self
    }

    /// Runs the scenario through `composer`, keeping the relief bundle and
    /// the rates on the chargeable income for reporting.
    pub fn evaluate(
        &self,
        composer: &ScenarioComposer<'_>,
    ) -> Evaluation {
        let outcome = composer.evaluate_profile(&self.profile, &self.reliefs, self.top_up);
        let chargeable_income = outcome.without_top_up().chargeable_income;
        let tax = composer.tax();

        Evaluation {
            bundle: ReliefBundle::from_profile(&self.profile, &self.reliefs),
            marginal_rate: tax.table().marginal_rate(chargeable_income),
            effective_rate: tax.effective_rate(chargeable_income),
            outcome,
        }
    }
}
