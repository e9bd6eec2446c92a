use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::clamp;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReliefError {
    #[error("NSman relief must be one of 0, 750, 1500, 3000, 3500 or 5000, got {0}")]
    InvalidNsmanAmount(Decimal),
}

/// Every relief the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefKind {
    EarnedIncome,
    Cpf,
    Spouse,
    Child,
    WorkingMotherChild,
    Parent,
    GrandparentCaregiver,
    HandicappedSibling,
    LifeInsurance,
    CourseFee,
    Nsman,
}

impl ReliefKind {
    /// All reliefs in display order.
    pub fn all() -> &'static [ReliefKind] {
        &[
            ReliefKind::EarnedIncome,
            ReliefKind::Cpf,
            ReliefKind::Spouse,
            ReliefKind::Child,
            ReliefKind::WorkingMotherChild,
            ReliefKind::Parent,
            ReliefKind::GrandparentCaregiver,
            ReliefKind::HandicappedSibling,
            ReliefKind::LifeInsurance,
            ReliefKind::CourseFee,
            ReliefKind::Nsman,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EarnedIncome => "earned_income",
            Self::Cpf => "cpf",
            Self::Spouse => "spouse",
            Self::Child => "child",
            Self::WorkingMotherChild => "working_mother_child",
            Self::Parent => "parent",
            Self::GrandparentCaregiver => "grandparent_caregiver",
            Self::HandicappedSibling => "handicapped_sibling",
            Self::LifeInsurance => "life_insurance",
            Self::CourseFee => "course_fee",
            Self::Nsman => "nsman",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EarnedIncome => "Earned Income Relief",
            Self::Cpf => "CPF Relief",
            Self::Spouse => "Spouse Relief",
            Self::Child => "Qualifying Child Relief",
            Self::WorkingMotherChild => "Working Mother's Child Relief",
            Self::Parent => "Parent Relief",
            Self::GrandparentCaregiver => "Grandparent Caregiver Relief",
            Self::HandicappedSibling => "Handicapped Sibling Relief",
            Self::LifeInsurance => "Life Insurance Relief",
            Self::CourseFee => "Course Fee Relief",
            Self::Nsman => "NSman Relief",
        }
    }

    /// Reliefs that only count towards the total for female taxpayers.
    pub fn is_female_only(&self) -> bool {
        matches!(self, Self::WorkingMotherChild | Self::GrandparentCaregiver)
    }
}

impl std::fmt::Display for ReliefKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A relief amount together with the maximum the taxpayer is entitled to.
///
/// Invariant: `0 <= amount <= cap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefClaim {
    pub kind: ReliefKind,
    amount: Decimal,
    cap: Decimal,
}

impl ReliefClaim {
    /// Claims `requested`, clamped into `[0, cap]`. A negative cap is
    /// treated as zero.
    pub fn new(
        kind: ReliefKind,
        requested: Decimal,
        cap: Decimal,
    ) -> Self {
        let cap = cap.max(Decimal::ZERO);
        let amount = clamp(requested, Decimal::ZERO, cap);
        if amount != requested {
            warn!(
                relief = kind.as_str(),
                %requested,
                %cap,
                %amount,
                "relief amount clamped"
            );
        }
        Self { kind, amount, cap }
    }

    /// Claims the whole cap, for reliefs that are computed rather than entered.
    pub fn full(
        kind: ReliefKind,
        cap: Decimal,
    ) -> Self {
        let cap = cap.max(Decimal::ZERO);
        Self {
            kind,
            amount: cap,
            cap,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn cap(&self) -> Decimal {
        self.cap
    }
}

/// NSman (self, wife and parent) relief tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NsmanRelief {
    #[default]
    None,
    /// Wife or parent of an NSman.
    WifeOrParent,
    /// Non-key appointment holder without in-camp training.
    NonKeyAppointment,
    /// Non-key appointment holder with in-camp training.
    NonKeyAppointmentWithIct,
    /// Key appointment holder without in-camp training.
    KeyAppointment,
    /// Key appointment holder with in-camp training.
    KeyAppointmentWithIct,
}

impl NsmanRelief {
    pub fn all() -> &'static [NsmanRelief] {
        &[
            NsmanRelief::None,
            NsmanRelief::WifeOrParent,
            NsmanRelief::NonKeyAppointment,
            NsmanRelief::NonKeyAppointmentWithIct,
            NsmanRelief::KeyAppointment,
            NsmanRelief::KeyAppointmentWithIct,
        ]
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::WifeOrParent => dec!(750),
            Self::NonKeyAppointment => dec!(1500),
            Self::NonKeyAppointmentWithIct => dec!(3000),
            Self::KeyAppointment => dec!(3500),
            Self::KeyAppointmentWithIct => dec!(5000),
        }
    }

    /// Maps a dollar amount back to its tier.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::InvalidNsmanAmount`] for any amount that is not
    /// one of the fixed tiers.
    pub fn from_amount(amount: Decimal) -> Result<Self, ReliefError> {
        Self::all()
            .iter()
            .copied()
            .find(|tier| tier.amount() == amount)
            .ok_or(ReliefError::InvalidNsmanAmount(amount))
    }
}

/// Caller-proposed relief amounts plus the eligibility inputs that drive
/// each relief's cap.
///
/// Earned income relief and CPF relief are not listed here: both are
/// derived from the [`TaxpayerProfile`](super::TaxpayerProfile).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefRequest {
    pub spouse: Decimal,
    pub spouse_is_handicapped: bool,

    pub child: Decimal,
    pub child_count: u32,
    pub handicapped_child_count: u32,

    pub working_mother_child: Decimal,

    pub parent: Decimal,
    pub parent_is_handicapped: bool,
    pub parent_stays_together: bool,

    pub grandparent_caregiver: Decimal,

    pub handicapped_sibling: Decimal,
    pub handicapped_sibling_count: u32,

    pub life_insurance: Decimal,

    pub course_fee: Decimal,

    pub nsman: NsmanRelief,
}

impl ReliefRequest {
    /// Children counted for working mother's child relief.
    pub fn qualifying_children(&self) -> u32 {
        self.child_count.saturating_add(self.handicapped_child_count)
    }
}
