use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single progressive band: income in `(min_income, max_income]` is taxed
/// at `tax_rate`. `max_income` is `None` for the open-ended top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }
}

/// Errors raised when a list of brackets does not partition `[0, ∞)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("no tax brackets provided")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    NonZeroStart(Decimal),

    #[error("bracket {index} starts at {found}, expected {expected}")]
    NotContiguous {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {index} upper bound {max_income} is not above its lower bound {min_income}")]
    NotIncreasing {
        index: usize,
        min_income: Decimal,
        max_income: Decimal,
    },

    #[error("only the last bracket may be unbounded (bracket {0} has no upper bound)")]
    UnboundedBeforeLast(usize),

    #[error("last bracket must be unbounded")]
    BoundedLast,

    #[error("bracket {index} rate must be in [0, 1), got {rate}")]
    InvalidRate { index: usize, rate: Decimal },
}

/// Ordered, validated set of tax brackets.
///
/// Construction through [`BracketTable::new`] guarantees the brackets are
/// sorted ascending, start at zero, are contiguous, and end in a single
/// unbounded band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketTableError> {
        let first = brackets.first().ok_or(BracketTableError::Empty)?;
        if first.min_income != Decimal::ZERO {
            return Err(BracketTableError::NonZeroStart(first.min_income));
        }

        let last_index = brackets.len() - 1;
        let mut expected_start = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.min_income != expected_start {
                return Err(BracketTableError::NotContiguous {
                    index,
                    expected: expected_start,
                    found: bracket.min_income,
                });
            }

            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate >= Decimal::ONE {
                return Err(BracketTableError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }

            match bracket.max_income {
                Some(_) if index == last_index => {
                    return Err(BracketTableError::BoundedLast);
                }
                Some(max_income) => {
                    if max_income <= bracket.min_income {
                        return Err(BracketTableError::NotIncreasing {
                            index,
                            min_income: bracket.min_income,
                            max_income,
                        });
                    }
                    expected_start = max_income;
                }
                None if index != last_index => {
                    return Err(BracketTableError::UnboundedBeforeLast(index));
                }
                None => {}
            }
        }

        Ok(Self { brackets })
    }

    /// The resident individual rates in force from YA 2024.
    pub fn singapore() -> &'static BracketTable {
        &SINGAPORE_BRACKETS
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Rate of the band that contains `income`. Zero and negative incomes
    /// fall in the first band.
    pub fn marginal_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.brackets
            .iter()
            .find(|b| b.max_income.is_none_or(|max| income <= max))
            .or(self.brackets.last())
            .map_or(Decimal::ZERO, |b| b.tax_rate)
    }
}

static SINGAPORE_BRACKETS: LazyLock<BracketTable> = LazyLock::new(|| BracketTable {
    brackets: vec![
        TaxBracket::new(dec!(0), Some(dec!(20000)), dec!(0)),
        TaxBracket::new(dec!(20000), Some(dec!(30000)), dec!(0.02)),
        TaxBracket::new(dec!(30000), Some(dec!(40000)), dec!(0.035)),
        TaxBracket::new(dec!(40000), Some(dec!(80000)), dec!(0.07)),
        TaxBracket::new(dec!(80000), Some(dec!(120000)), dec!(0.115)),
        TaxBracket::new(dec!(120000), Some(dec!(160000)), dec!(0.15)),
        TaxBracket::new(dec!(160000), Some(dec!(200000)), dec!(0.18)),
        TaxBracket::new(dec!(200000), Some(dec!(240000)), dec!(0.19)),
        TaxBracket::new(dec!(240000), Some(dec!(280000)), dec!(0.195)),
        TaxBracket::new(dec!(280000), Some(dec!(320000)), dec!(0.20)),
        TaxBracket::new(dec!(320000), Some(dec!(500000)), dec!(0.22)),
        TaxBracket::new(dec!(500000), Some(dec!(1000000)), dec!(0.23)),
        TaxBracket::new(dec!(1000000), None, dec!(0.24)),
    ],
});
