//! Dollar formatting for report tables.

use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;

/// Formats an amount as dollars with thousands separators, e.g. `$21,742.00`.
/// Negative amounts get a leading minus: `-$1,141.00`.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Like [`format_usd`] but always shows the sign, for changes.
pub fn format_usd_signed(amount: Decimal) -> String {
    if amount > Decimal::ZERO {
        format!("+{}", format_usd(amount))
    } else {
        format_usd(amount)
    }
}

pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", percent.normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(999.5)), "$999.50");
        assert_eq!(format_usd(dec!(21742)), "$21,742.00");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_usd(dec!(100000)), "$100,000.00");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(dec!(-1141)), "-$1,141.00");
        assert_eq!(format_usd(dec!(-0.004)), "$0.00");
    }

    #[test]
    fn test_format_usd_signed() {
        assert_eq!(format_usd_signed(dec!(5280)), "+$5,280.00");
        assert_eq!(format_usd_signed(dec!(-8477.73)), "-$8,477.73");
        assert_eq!(format_usd_signed(dec!(0)), "$0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(3.500)), "3.5%");
        assert_eq!(format_percent(dec!(0)), "0%");
        assert_eq!(format_percent(dec!(4.95)), "4.95%");
    }
}
