//! Display formatting for prices (Brazilian real, `R$ 1.234,56`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats `price` the way the storefront shows it: `R$` prefix, `.` thousands
/// separator, `,` decimal separator, always two decimal places.
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = rounded.abs().to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    format!(
        "{sign}R$ {},{:0<2}",
        group_thousands(integer),
        fraction
    )
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_cents_and_pads_fraction() {
        assert_eq!(format_price(Decimal::new(1799, 1)), "R$ 179,90");
        assert_eq!(format_price(Decimal::new(200, 0)), "R$ 200,00");
        assert_eq!(format_price(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn test_groups_thousands() {
        assert_eq!(format_price(Decimal::new(123456789, 2)), "R$ 1.234.567,89");
        assert_eq!(format_price(Decimal::new(100000, 2)), "R$ 1.000,00");
        assert_eq!(format_price(Decimal::new(99999, 2)), "R$ 999,99");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_price(Decimal::new(10005, 3)), "R$ 10,01");
        assert_eq!(format_price(Decimal::new(-2500, 2)), "-R$ 25,00");
    }
}
