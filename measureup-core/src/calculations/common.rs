//! Shared helpers for monetisation calculations and presentation.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (midpoint away from zero), the standard financial convention.
///
/// The engine itself never rounds; this is for presentation (reports and
/// display strings) only.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a monetary or quantity output with exactly two decimal places.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(123.45)), dec!(123.45));
    }

    #[test]
    fn format_money_pads_to_two_decimals() {
        assert_eq!(format_money(dec!(100)), "100.00");
        assert_eq!(format_money(dec!(0.375)), "0.38");
        assert_eq!(format_money(dec!(1000)), "1000.00");
    }

    #[test]
    fn format_money_handles_zero() {
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }
}
