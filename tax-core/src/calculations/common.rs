//! Rounding and clamping helpers shared by every calculation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with exact half-cents rounding away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(8477.7345)), dec!(8477.73));
/// assert_eq!(round_half_up(dec!(1606.885)), dec!(1606.89));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two amounts.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(14600), dec!(12000)), dec!(14600));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps an amount to zero from below.
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
        assert_eq!(round_half_up(dec!(6870.844)), dec!(6870.84));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn round_half_up_handles_negative_midpoint() {
        assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35));
    }

    #[test]
    fn round_half_up_keeps_whole_dollars() {
        assert_eq!(round_half_up(dec!(29200)), dec!(29200));
    }

    #[test]
    fn round_half_up_carries_into_dollars() {
        assert_eq!(round_half_up(dec!(21741.995)), dec!(21742.00));
    }

    // =========================================================================
    // max / non_negative tests
    // =========================================================================

    #[test]
    fn max_prefers_itemized_when_larger() {
        assert_eq!(max(dec!(14600), dec!(20000)), dec!(20000));
    }

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(29200), dec!(29200)), dec!(29200));
    }

    #[test]
    fn non_negative_clamps_losses_to_zero() {
        assert_eq!(non_negative(dec!(-12000)), dec!(0));
    }

    #[test]
    fn non_negative_keeps_positive_values() {
        assert_eq!(non_negative(dec!(155800)), dec!(155800));
    }
}
