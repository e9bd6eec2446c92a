//! Relief cap formulas.
//!
//! Each function computes the maximum relief for one relief type from that
//! relief's own eligibility inputs. None of them fail: negative or
//! oversized inputs are clamped so the result always lies in `[0, cap]`.
//!
//! | Relief | Cap |
//! |--------|-----|
//! | Earned income | lower of income and an age/handicap tier |
//! | CPF | age-based contribution rate on wages up to the wage ceilings |
//! | Spouse | 2,000 (5,500 for a handicapped spouse) |
//! | Child | 4,000 per child, 7,500 per handicapped child |
//! | Working mother's child | 15% / 20% / 25% of earned income for the 1st / 2nd / later children |
//! | Parent | 5,500 to 14,000 depending on handicap and living arrangement |
//! | Grandparent caregiver | 3,000 |
//! | Handicapped sibling | 5,500 per sibling |
//! | Life insurance | 5,000 less CPF contributions |
//! | Course fee | 5,500 |
//! | NSman | fixed tier amount |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::NsmanRelief;
use crate::calculations::common::{min, non_negative, round_half_up};

/// Annual ceiling on ordinary wages attracting CPF contributions.
pub const CPF_ORDINARY_WAGE_CEILING: Decimal = dec!(88800);
/// Annual ceiling on ordinary plus additional wages attracting CPF contributions.
pub const CPF_ANNUAL_WAGE_CEILING: Decimal = dec!(102000);

pub const SPOUSE_RELIEF: Decimal = dec!(2000);
pub const HANDICAPPED_SPOUSE_RELIEF: Decimal = dec!(5500);
pub const CHILD_RELIEF: Decimal = dec!(4000);
pub const HANDICAPPED_CHILD_RELIEF: Decimal = dec!(7500);
pub const GRANDPARENT_CAREGIVER_RELIEF: Decimal = dec!(3000);
pub const HANDICAPPED_SIBLING_RELIEF: Decimal = dec!(5500);
pub const LIFE_INSURANCE_LIMIT: Decimal = dec!(5000);
pub const COURSE_FEE_RELIEF: Decimal = dec!(5500);

/// Earned income relief: the lower of earned income and the tier for the
/// taxpayer's age.
///
/// | Age | Normal | Handicapped |
/// |-----|--------|-------------|
/// | below 55 | 1,000 | 4,000 |
/// | 55 to 59 | 6,000 | 10,000 |
/// | 60 and above | 8,000 | 12,000 |
pub fn earned_income_relief(
    age: u32,
    is_handicapped: bool,
    income: Decimal,
) -> Decimal {
    let tier = match (is_handicapped, age) {
        (false, 0..=54) => dec!(1000),
        (false, 55..=59) => dec!(6000),
        (false, _) => dec!(8000),
        (true, 0..=54) => dec!(4000),
        (true, 55..=59) => dec!(10000),
        (true, _) => dec!(12000),
    };

    min(non_negative(income), tier)
}

/// Employee CPF contribution rate for the given age.
pub fn cpf_contribution_rate(age: u32) -> Decimal {
    match age {
        0..=55 => dec!(0.20),
        56..=60 => dec!(0.17),
        61..=65 => dec!(0.115),
        66..=70 => dec!(0.075),
        _ => dec!(0.05),
    }
}

/// CPF relief on compulsory employee contributions.
///
/// Ordinary wages count up to [`CPF_ORDINARY_WAGE_CEILING`]; the bonus counts
/// up to whatever is left of [`CPF_ANNUAL_WAGE_CEILING`] after the capped
/// ordinary wages.
pub fn cpf_relief(
    age: u32,
    ordinary_wages: Decimal,
    bonus: Decimal,
) -> Decimal {
    let capped_ordinary = min(non_negative(ordinary_wages), CPF_ORDINARY_WAGE_CEILING);
    let bonus_ceiling = non_negative(CPF_ANNUAL_WAGE_CEILING - capped_ordinary);
    let capped_bonus = min(non_negative(bonus), bonus_ceiling);

    round_half_up(cpf_contribution_rate(age) * (capped_ordinary + capped_bonus))
}

pub fn spouse_relief_cap(spouse_is_handicapped: bool) -> Decimal {
    if spouse_is_handicapped {
        HANDICAPPED_SPOUSE_RELIEF
    } else {
        SPOUSE_RELIEF
    }
}

pub fn child_relief_cap(
    child_count: u32,
    handicapped_child_count: u32,
) -> Decimal {
    CHILD_RELIEF * Decimal::from(child_count)
        + HANDICAPPED_CHILD_RELIEF * Decimal::from(handicapped_child_count)
}

/// Working mother's child relief cap.
///
/// The percentage of the mother's earned income grows with each child:
/// 15% for the first, a further 20% for the second, and 25% for each child
/// after that. The relief never exceeds the earned income itself.
pub fn working_mother_child_relief_cap(
    mother_income: Decimal,
    child_count: u32,
) -> Decimal {
    let mut percentage = dec!(0.15);
    if child_count > 1 {
        percentage += dec!(0.20);
    }
    if child_count > 2 {
        percentage += dec!(0.25) * Decimal::from(child_count - 2);
    }

    // Capping the rate before multiplying keeps huge incomes from overflowing.
    let income = non_negative(mother_income);
    round_half_up(income * min(percentage, Decimal::ONE))
}

/// Parent relief cap, per parent.
///
/// | Parent handicapped | Staying together | Cap |
/// |--------------------|------------------|-----|
/// | no  | no  | 5,500 |
/// | no  | yes | 9,000 |
/// | yes | no  | 10,000 |
/// | yes | yes | 14,000 |
pub fn parent_relief_cap(
    parent_is_handicapped: bool,
    stays_together: bool,
) -> Decimal {
    match (parent_is_handicapped, stays_together) {
        (false, false) => dec!(5500),
        (false, true) => dec!(9000),
        (true, false) => dec!(10000),
        (true, true) => dec!(14000),
    }
}

pub fn grandparent_caregiver_relief_cap() -> Decimal {
    GRANDPARENT_CAREGIVER_RELIEF
}

pub fn handicapped_sibling_relief_cap(sibling_count: u32) -> Decimal {
    HANDICAPPED_SIBLING_RELIEF * Decimal::from(sibling_count)
}

/// Life insurance relief is only available for the part of the 5,000 limit
/// not already used by CPF contributions.
pub fn life_insurance_relief_cap(cpf_contribution: Decimal) -> Decimal {
    non_negative(LIFE_INSURANCE_LIMIT - non_negative(cpf_contribution))
}

pub fn course_fee_relief_cap() -> Decimal {
    COURSE_FEE_RELIEF
}

pub fn nsman_relief(tier: NsmanRelief) -> Decimal {
    tier.amount()
}
