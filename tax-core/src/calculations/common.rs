//! Shared helpers for the tax and relief calculations.
//!
//! Everything here is a small pure function over [`Decimal`]; rounding and
//! clamping are kept in one place so every formula rounds the same way.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Restricts `value` to `[lower, upper]`.
///
/// Unlike [`Decimal::clamp`] this never panics: if `upper < lower` the
/// result is `lower`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::clamp;
///
/// assert_eq!(clamp(dec!(7500), dec!(0), dec!(5500)), dec!(5500));
/// assert_eq!(clamp(dec!(-20), dec!(0), dec!(5500)), dec!(0));
/// assert_eq!(clamp(dec!(10), dec!(0), dec!(-1)), dec!(0));
/// ```
pub fn clamp(
    value: Decimal,
    lower: Decimal,
    upper: Decimal,
) -> Decimal {
    max(min(value, upper), lower)
}

/// Floors a value at zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46));
    }

    #[test]
    fn round_half_up_rounds_cpf_style_products() {
        // 0.115 * 1234.5 = 141.9675
        let result = round_half_up(dec!(0.115) * dec!(1234.5));

        assert_eq!(result, dec!(141.97));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        assert_eq!(max(dec!(-50.00), dec!(50.00)), dec!(50.00));
    }

    #[test]
    fn min_returns_smaller_value() {
        assert_eq!(min(dec!(88800), dec!(120000)), dec!(88800));
        assert_eq!(min(dec!(-1), dec!(0)), dec!(-1));
    }

    // =========================================================================
    // clamp tests
    // =========================================================================

    #[test]
    fn clamp_passes_through_values_in_range() {
        assert_eq!(clamp(dec!(1200), dec!(0), dec!(2000)), dec!(1200));
    }

    #[test]
    fn clamp_limits_to_upper_bound() {
        assert_eq!(clamp(dec!(2500), dec!(0), dec!(2000)), dec!(2000));
    }

    #[test]
    fn clamp_limits_to_lower_bound() {
        assert_eq!(clamp(dec!(-2500), dec!(0), dec!(2000)), dec!(0));
    }

    #[test]
    fn clamp_prefers_lower_bound_when_bounds_cross() {
        assert_eq!(clamp(dec!(50), dec!(0), dec!(-10)), dec!(0));
    }

    #[test]
    fn non_negative_floors_at_zero() {
        assert_eq!(non_negative(dec!(-0.01)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(42)), dec!(42));
    }
}
