//! Progressive (marginal-sum) income tax.
//!
//! Tax is the sum over every band the income reaches of
//! `(min(income, band upper bound) - band lower bound) * band rate`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::compute_tax;
//!
//! // 10,000 at 2% + 10,000 at 3.5%
//! assert_eq!(compute_tax(dec!(40000)), dec!(550.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{BracketTable, TaxBracket};
use crate::calculations::common::{min, round_half_up};

/// Tax attributable to a single band for a given income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    /// Portion of the income that falls inside this band.
    pub taxable_amount: Decimal,
    /// `taxable_amount * tax_rate`, rounded to cents.
    pub tax: Decimal,
}

/// Calculator over a borrowed [`BracketTable`].
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTax<'a> {
    table: &'a BracketTable,
}

impl<'a> ProgressiveTax<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a BracketTable {
        self.table
    }

    /// Tax payable on `chargeable_income`, rounded to cents.
    ///
    /// Zero or negative income yields zero tax.
    pub fn calculate(
        &self,
        chargeable_income: Decimal,
    ) -> Decimal {
        let tax: Decimal = self
            .band_slices(chargeable_income)
            .map(|(_, taxable, rate)| taxable * rate)
            .sum();

        round_half_up(tax)
    }

    /// Per-band split of the tax on `income`, covering only the bands the
    /// income actually reaches.
    pub fn breakdown(
        &self,
        income: Decimal,
    ) -> Vec<BracketTax> {
        self.band_slices(income)
            .map(|(bracket, taxable_amount, tax_rate)| BracketTax {
                min_income: bracket.min_income,
                max_income: bracket.max_income,
                tax_rate,
                taxable_amount,
                tax: round_half_up(taxable_amount * tax_rate),
            })
            .collect()
    }

    /// Effective (average) rate, `None` for zero income.
    pub fn effective_rate(
        &self,
        chargeable_income: Decimal,
    ) -> Option<Decimal> {
        if chargeable_income <= Decimal::ZERO {
            return None;
        }
        Some(self.calculate(chargeable_income) / chargeable_income)
    }

    fn band_slices(
        &self,
        income: Decimal,
    ) -> impl Iterator<Item = (&'a TaxBracket, Decimal, Decimal)> {
        self.table
            .brackets()
            .iter()
            .take_while(move |bracket| income > bracket.min_income)
            .map(move |bracket| {
                let upper = bracket.max_income.map_or(income, |max| min(income, max));
                let taxable = upper - bracket.min_income;
                trace!(
                    min_income = %bracket.min_income,
                    rate = %bracket.tax_rate,
                    %taxable,
                    "bracket slice"
                );
                (bracket, taxable, bracket.tax_rate)
            })
    }
}

/// Tax payable on `chargeable_income` under the Singapore resident rates.
pub fn compute_tax(chargeable_income: Decimal) -> Decimal {
    ProgressiveTax::new(BracketTable::singapore()).calculate(chargeable_income)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    use super::*;

    fn singapore() -> ProgressiveTax<'static> {
        ProgressiveTax::new(BracketTable::singapore())
    }

    fn cents(value: u64) -> Decimal {
        Decimal::new(value as i64, 2)
    }

    // =========================================================================
    // reference amounts
    // =========================================================================

    #[test]
    fn zero_income_pays_no_tax() {
        assert_eq!(compute_tax(dec!(0)), dec!(0));
    }

    #[test]
    fn first_20000_is_tax_free() {
        assert_eq!(compute_tax(dec!(20000)), dec!(0));
    }

    #[test]
    fn income_of_30000() {
        // 10,000 * 2%
        assert_eq!(compute_tax(dec!(30000)), dec!(200));
    }

    #[test]
    fn income_of_40000() {
        // 200 + 10,000 * 3.5%
        assert_eq!(compute_tax(dec!(40000)), dec!(550));
    }

    #[test]
    fn income_of_49000() {
        // 200 + 350 + 9,000 * 7%
        assert_eq!(compute_tax(dec!(49000)), dec!(1180));
    }

    #[test]
    fn income_of_100000() {
        // 200 + 350 + 2,800 + 20,000 * 11.5%
        assert_eq!(compute_tax(dec!(100000)), dec!(5650));
    }

    #[test]
    fn income_of_one_million_sums_every_band_through_23_percent() {
        // 200 + 350 + 2800 + 4600 + 6000 + 7200 + 7600 + 7800 + 8000
        // + 39600 + 115000
        assert_eq!(compute_tax(dec!(1000000)), dec!(199150));
    }

    #[test]
    fn income_above_one_million_uses_top_rate() {
        assert_eq!(compute_tax(dec!(1500000)), dec!(319150));
    }

    #[test]
    fn fractional_income_rounds_to_cents() {
        // 0.01 * 2% = 0.0002
        assert_eq!(compute_tax(dec!(20000.01)), dec!(0.00));
        // 1,234.56 * 3.5% = 43.2096, plus 200
        assert_eq!(compute_tax(dec!(31234.56)), dec!(243.21));
    }

    #[test]
    fn negative_income_pays_no_tax() {
        assert_eq!(compute_tax(dec!(-5000)), dec!(0));
    }

    // =========================================================================
    // breakdown / effective_rate tests
    // =========================================================================

    #[test]
    fn breakdown_covers_reached_bands_only() {
        let breakdown = singapore().breakdown(dec!(45000));

        assert_eq!(breakdown.len(), 4);
        assert_eq!(breakdown[0].tax, dec!(0));
        assert_eq!(breakdown[1].taxable_amount, dec!(10000));
        assert_eq!(breakdown[1].tax, dec!(200));
        assert_eq!(breakdown[2].tax, dec!(350));
        assert_eq!(breakdown[3].min_income, dec!(40000));
        assert_eq!(breakdown[3].taxable_amount, dec!(5000));
        assert_eq!(breakdown[3].tax, dec!(350));
    }

    #[test]
    fn breakdown_is_empty_for_zero_income() {
        assert!(singapore().breakdown(Decimal::ZERO).is_empty());
    }

    #[test]
    fn breakdown_sums_to_calculated_tax() {
        let income = dec!(275000);
        let calculator = singapore();

        let total: Decimal = calculator.breakdown(income).iter().map(|b| b.tax).sum();

        assert_eq!(total, calculator.calculate(income));
    }

    #[test]
    fn effective_rate_is_none_for_zero_income() {
        assert_eq!(singapore().effective_rate(Decimal::ZERO), None);
    }

    #[test]
    fn effective_rate_divides_tax_by_income() {
        assert_eq!(singapore().effective_rate(dec!(40000)), Some(dec!(0.01375)));
    }

    #[test]
    fn custom_table_is_respected() {
        let table = BracketTable::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(0.10)),
            TaxBracket::new(dec!(10000), None, dec!(0.50)),
        ])
        .unwrap();
        let calculator = ProgressiveTax::new(&table);

        assert_eq!(calculator.calculate(dec!(12000)), dec!(2000));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #[test]
        fn prop_tax_is_non_negative(income in 0u64..500_000_000) {
            prop_assert!(compute_tax(cents(income)) >= Decimal::ZERO);
        }

        #[test]
        fn prop_tax_is_monotonic(a in 0u64..300_000_000, b in 0u64..300_000_000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(compute_tax(cents(low)) <= compute_tax(cents(high)));
        }

        #[test]
        fn prop_tax_never_exceeds_top_rate(income in 0u64..500_000_000) {
            let income = cents(income);
            prop_assert!(compute_tax(income) <= income * dec!(0.24));
        }

        #[test]
        fn prop_tax_is_deterministic(income in 0u64..500_000_000) {
            prop_assert!(compute_tax(cents(income)) == compute_tax(cents(income)));
        }
    }
}
