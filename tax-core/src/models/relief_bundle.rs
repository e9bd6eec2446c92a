use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ReliefClaim, ReliefKind, ReliefRequest, TaxpayerProfile};
use crate::calculations::reliefs;

/// One [`ReliefClaim`] per relief type for a single taxpayer.
///
/// Working mother's child relief and grandparent caregiver relief are
/// always computed here; whether they count towards the total is decided
/// by the aggregator from the taxpayer's gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefBundle {
    pub earned_income: ReliefClaim,
    pub cpf: ReliefClaim,
    pub spouse: ReliefClaim,
    pub child: ReliefClaim,
    pub working_mother_child: ReliefClaim,
    pub parent: ReliefClaim,
    pub grandparent_caregiver: ReliefClaim,
    pub handicapped_sibling: ReliefClaim,
    pub life_insurance: ReliefClaim,
    pub course_fee: ReliefClaim,
    pub nsman: ReliefClaim,
}

impl ReliefBundle {
    /// A bundle with every relief at zero.
    pub fn empty() -> Self {
        let zero = |kind| ReliefClaim::full(kind, Decimal::ZERO);
        Self {
            earned_income: zero(ReliefKind::EarnedIncome),
            cpf: zero(ReliefKind::Cpf),
            spouse: zero(ReliefKind::Spouse),
            child: zero(ReliefKind::Child),
            working_mother_child: zero(ReliefKind::WorkingMotherChild),
            parent: zero(ReliefKind::Parent),
            grandparent_caregiver: zero(ReliefKind::GrandparentCaregiver),
            handicapped_sibling: zero(ReliefKind::HandicappedSibling),
            life_insurance: zero(ReliefKind::LifeInsurance),
            course_fee: zero(ReliefKind::CourseFee),
            nsman: zero(ReliefKind::Nsman),
        }
    }

    /// Builds every claim for `profile`.
    ///
    /// Earned income relief (on assessable income) and CPF relief (on
    /// employment income and bonus) are claimed in full. The CPF relief
    /// also reduces the life insurance cap, and the working mother's child
    /// cap is based on net employment income. All other amounts come from
    /// `request` and are clamped to their caps.
    pub fn from_profile(
        profile: &TaxpayerProfile,
        request: &ReliefRequest,
    ) -> Self {
        let earned_income = ReliefClaim::full(
            ReliefKind::EarnedIncome,
            reliefs::earned_income_relief(
                profile.age,
                profile.is_handicapped,
                profile.assessable_income(),
            ),
        );

        let cpf_amount =
            reliefs::cpf_relief(profile.age, profile.employment_income, profile.bonus);
        let cpf = ReliefClaim::full(ReliefKind::Cpf, cpf_amount);

        let bundle = Self {
            earned_income,
            cpf,
            spouse: ReliefClaim::new(
                ReliefKind::Spouse,
                request.spouse,
                reliefs::spouse_relief_cap(request.spouse_is_handicapped),
            ),
            child: ReliefClaim::new(
                ReliefKind::Child,
                request.child,
                reliefs::child_relief_cap(request.child_count, request.handicapped_child_count),
            ),
            working_mother_child: ReliefClaim::new(
                ReliefKind::WorkingMotherChild,
                request.working_mother_child,
                reliefs::working_mother_child_relief_cap(
                    profile.net_employment_income(),
                    request.qualifying_children(),
                ),
            ),
            parent: ReliefClaim::new(
                ReliefKind::Parent,
                request.parent,
                reliefs::parent_relief_cap(
                    request.parent_is_handicapped,
                    request.parent_stays_together,
                ),
            ),
            grandparent_caregiver: ReliefClaim::new(
                ReliefKind::GrandparentCaregiver,
                request.grandparent_caregiver,
                reliefs::grandparent_caregiver_relief_cap(),
            ),
            handicapped_sibling: ReliefClaim::new(
                ReliefKind::HandicappedSibling,
                request.handicapped_sibling,
                reliefs::handicapped_sibling_relief_cap(request.handicapped_sibling_count),
            ),
            life_insurance: ReliefClaim::new(
                ReliefKind::LifeInsurance,
                request.life_insurance,
                reliefs::life_insurance_relief_cap(cpf_amount),
            ),
            course_fee: ReliefClaim::new(
                ReliefKind::CourseFee,
                request.course_fee,
                reliefs::course_fee_relief_cap(),
            ),
            nsman: ReliefClaim::full(ReliefKind::Nsman, reliefs::nsman_relief(request.nsman)),
        };

        debug!(
            earned_income = %bundle.earned_income.amount(),
            cpf = %bundle.cpf.amount(),
            "relief bundle built"
        );

        bundle
    }

    /// Claims in [`ReliefKind::all`] order.
    pub fn claims(&self) -> [&ReliefClaim; 11] {
        [
            &self.earned_income,
            &self.cpf,
            &self.spouse,
            &self.child,
            &self.working_mother_child,
            &self.parent,
            &self.grandparent_caregiver,
            &self.handicapped_sibling,
            &self.life_insurance,
            &self.course_fee,
            &self.nsman,
        ]
    }

    pub fn claim(
        &self,
        kind: ReliefKind,
    ) -> &ReliefClaim {
        match kind {
            ReliefKind::EarnedIncome => &self.earned_income,
            ReliefKind::Cpf => &self.cpf,
            ReliefKind::Spouse => &self.spouse,
            ReliefKind::Child => &self.child,
            ReliefKind::WorkingMotherChild => &self.working_mother_child,
            ReliefKind::Parent => &self.parent,
            ReliefKind::GrandparentCaregiver => &self.grandparent_caregiver,
            ReliefKind::HandicappedSibling => &self.handicapped_sibling,
            ReliefKind::LifeInsurance => &self.life_insurance,
            ReliefKind::CourseFee => &self.course_fee,
            ReliefKind::Nsman => &self.nsman,
        }
    }

    /// Replaces the claim of the same kind.
    pub fn with_claim(
        mut self,
        claim: ReliefClaim,
    ) -> Self {
        let slot = match claim.kind {
            ReliefKind::EarnedIncome => &mut self.earned_income,
            ReliefKind::Cpf => &mut self.cpf,
            ReliefKind::Spouse => &mut self.spouse,
            ReliefKind::Child => &mut self.child,
            ReliefKind::WorkingMotherChild => &mut self.working_mother_child,
            ReliefKind::Parent => &mut self.parent,
            ReliefKind::GrandparentCaregiver => &mut self.grandparent_caregiver,
            ReliefKind::HandicappedSibling => &mut self.handicapped_sibling,
            ReliefKind::LifeInsurance => &mut self.life_insurance,
            ReliefKind::CourseFee => &mut self.course_fee,
            ReliefKind::Nsman => &mut self.nsman,
        };
        *slot = claim;
        self
    }
}

impl Default for ReliefBundle {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{Gender, NsmanRelief};

    fn profile() -> TaxpayerProfile {
        TaxpayerProfile {
            age: 40,
            is_handicapped: false,
            gender: Gender::Female,
            employment_income: dec!(60000),
            bonus: dec!(6000),
            business_expenses: dec!(0),
            other_income: dec!(0),
            approved_donations: dec!(0),
        }
    }

    #[test]
    fn empty_bundle_claims_nothing() {
        let bundle = ReliefBundle::empty();

        assert!(bundle.claims().iter().all(|c| c.amount() == Decimal::ZERO));
    }

    #[test]
    fn claims_follow_relief_kind_order() {
        let bundle = ReliefBundle::empty();

        let kinds: Vec<ReliefKind> = bundle.claims().iter().map(|c| c.kind).collect();

        assert_eq!(kinds, ReliefKind::all().to_vec());
    }

    #[test]
    fn from_profile_computes_earned_income_and_cpf() {
        let bundle = ReliefBundle::from_profile(&profile(), &ReliefRequest::default());

        assert_eq!(bundle.earned_income.amount(), dec!(1000));
        // 20% of 66,000
        assert_eq!(bundle.cpf.amount(), dec!(13200));
    }

    #[test]
    fn from_profile_clamps_requested_amounts() {
        let request = ReliefRequest {
            spouse: dec!(9000),
            child: dec!(20000),
            child_count: 2,
            parent: dec!(9000),
            parent_stays_together: true,
            course_fee: dec!(8000),
            grandparent_caregiver: dec!(-5),
            ..Default::default()
        };

        let bundle = ReliefBundle::from_profile(&profile(), &request);

        assert_eq!(bundle.spouse.amount(), dec!(2000));
        assert_eq!(bundle.child.amount(), dec!(8000));
        assert_eq!(bundle.parent.amount(), dec!(9000));
        assert_eq!(bundle.course_fee.amount(), dec!(5500));
        assert_eq!(bundle.grandparent_caregiver.amount(), dec!(0));
    }

    #[test]
    fn life_insurance_cap_uses_computed_cpf() {
        let low_wage = TaxpayerProfile {
            employment_income: dec!(18000),
            bonus: dec!(0),
            ..profile()
        };
        let request = ReliefRequest {
            life_insurance: dec!(5000),
            ..Default::default()
        };

        let bundle = ReliefBundle::from_profile(&low_wage, &request);

        // CPF 3,600 leaves 1,400 of the 5,000 limit
        assert_eq!(bundle.cpf.amount(), dec!(3600));
        assert_eq!(bundle.life_insurance.cap(), dec!(1400));
        assert_eq!(bundle.life_insurance.amount(), dec!(1400));
    }

    #[test]
    fn working_mother_cap_uses_net_employment_income() {
        let request = ReliefRequest {
            working_mother_child: dec!(50000),
            child_count: 1,
            ..Default::default()
        };

        let bundle = ReliefBundle::from_profile(&profile(), &request);

        // 15% of 66,000
        assert_eq!(bundle.working_mother_child.cap(), dec!(9900));
        assert_eq!(bundle.working_mother_child.amount(), dec!(9900));
    }

    #[test]
    fn nsman_tier_is_claimed_in_full() {
        let request = ReliefRequest {
            nsman: NsmanRelief::NonKeyAppointmentWithIct,
            ..Default::default()
        };

        let bundle = ReliefBundle::from_profile(&profile(), &request);

        assert_eq!(bundle.nsman.amount(), dec!(3000));
    }

    #[test]
    fn with_claim_replaces_matching_kind() {
        let bundle = ReliefBundle::empty()
            .with_claim(ReliefClaim::new(ReliefKind::Parent, dec!(5000), dec!(5500)));

        assert_eq!(bundle.claim(ReliefKind::Parent).amount(), dec!(5000));
        assert_eq!(bundle.claim(ReliefKind::Spouse).amount(), dec!(0));
    }

    #[test]
    fn from_profile_is_deterministic() {
        let request = ReliefRequest {
            spouse: dec!(2000),
            ..Default::default()
        };

        assert_eq!(
            ReliefBundle::from_profile(&profile(), &request),
            ReliefBundle::from_profile(&profile(), &request)
        );
    }
}
