//! Combines the individual reliefs into one capped total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::{min, non_negative};
use crate::{Gender, ReliefBundle, ReliefSummary};

/// Ceiling on the total of all ordinary reliefs for a year of assessment.
pub const GLOBAL_RELIEF_CAP: Decimal = dec!(80000);

/// Sums the reliefs that apply to a taxpayer of `gender` and caps the total.
///
/// Working mother's child relief and grandparent caregiver relief only
/// count for female taxpayers.
pub fn aggregate_reliefs(
    bundle: &ReliefBundle,
    gender: Gender,
) -> ReliefSummary {
    let mut sum = bundle.earned_income.amount()
        + bundle.spouse.amount()
        + bundle.child.amount()
        + bundle.parent.amount()
        + bundle.handicapped_sibling.amount()
        + bundle.cpf.amount()
        + bundle.life_insurance.amount()
        + bundle.course_fee.amount()
        + bundle.nsman.amount();

    if gender.is_female() {
        sum += bundle.working_mother_child.amount();
        sum += bundle.grandparent_caregiver.amount();
    }

    let total_relief = min(sum, GLOBAL_RELIEF_CAP);
    let room_remaining = non_negative(GLOBAL_RELIEF_CAP - total_relief);

    debug!(%gender, %sum, %total_relief, %room_remaining, "reliefs aggregated");

    ReliefSummary {
        total_relief,
        room_remaining,
    }
}
