//! Monetary derivation and display.
//!
//! All amounts are `rust_decimal::Decimal`; floats never touch money. VAT is
//! derived per option at a fixed 5% rate, rounded half-up to cents exactly
//! once. Totals are plain sums of already-rounded parts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed VAT rate: 5%.
pub fn vat_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Half-up rounding to two decimal places.
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// VAT owed on a net rate. The only place rounding is applied.
pub fn vat_on(net_rate: Decimal) -> Decimal {
    round_half_up(net_rate * vat_rate())
}

/// `AED 2,100,000.00` — fixed currency prefix, two decimals, thousands
/// separators. Display-only; never feeds back into arithmetic.
pub fn format_aed(amount: Decimal) -> String {
    format!("AED {}", format_amount(amount))
}

pub fn format_amount(amount: Decimal) -> String {
    let fixed = format!("{:.2}", round_half_up(amount));
    let (whole, cents) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole),
    };
    format!("{sign}{}.{cents}", group_thousands(digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{format_aed, vat_on};

    #[test]
    fn vat_is_five_percent_of_the_net_rate() {
        assert_eq!(vat_on(Decimal::from(2_000_000)), Decimal::from(100_000));
        assert_eq!(vat_on(Decimal::from(3_500_000)), Decimal::from(175_000));
    }

    #[test]
    fn vat_midpoints_round_away_from_zero() {
        // 10.10 * 0.05 = 0.505 -> 0.51, not banker's 0.50
        assert_eq!(vat_on(Decimal::new(1010, 2)), Decimal::new(51, 2));
        // 10.30 * 0.05 = 0.515 -> 0.52
        assert_eq!(vat_on(Decimal::new(1030, 2)), Decimal::new(52, 2));
    }

    #[test]
    fn formatting_groups_thousands_and_fixes_two_decimals() {
        assert_eq!(format_aed(Decimal::from(2_000_000)), "AED 2,000,000.00");
        assert_eq!(format_aed(Decimal::new(123_450, 2)), "AED 1,234.50");
        assert_eq!(format_aed(Decimal::from(999)), "AED 999.00");
        assert_eq!(format_aed(Decimal::from(1_000)), "AED 1,000.00");
    }

    #[test]
    fn formatting_handles_sub_thousand_and_fractional_amounts() {
        assert_eq!(format_aed(Decimal::new(5, 1)), "AED 0.50");
        assert_eq!(format_aed(Decimal::ZERO), "AED 0.00");
    }
}
