//! Token amount formatting.

use primitive_types::U256;

/// Render a raw token amount as a whole-unit decimal string.
///
/// Scales `amount` down by `10^decimals` and trims trailing zeros from the
/// fractional part, so `1500000` at 6 decimals renders as `1.5`.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let Some(divisor) = U256::from(10u64).checked_pow(U256::from(decimals)) else {
        // 10^decimals exceeds 256 bits, so the whole part is always zero
        return format_fraction(U256::zero(), amount, decimals);
    };

    let whole = amount / divisor;
    let frac = amount % divisor;
    format_fraction(whole, frac, decimals)
}

fn format_fraction(whole: U256, frac: U256, decimals: u8) -> String {
    if frac.is_zero() {
        return whole.to_string();
    }
    let padded = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units_whole_amount() {
        assert_eq!(format_units(U256::from(5_000_000u64), 6), "5");
    }

    #[test]
    fn test_format_units_fractional() {
        assert_eq!(format_units(U256::from(1_234_567u64), 6), "1.234567");
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
    }

    #[test]
    fn test_format_units_sub_unit() {
        assert_eq!(format_units(U256::from(123u64), 6), "0.000123");
    }

    #[test]
    fn test_format_units_zero_decimals() {
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_format_units_zero_amount() {
        assert_eq!(format_units(U256::zero(), 18), "0");
    }

    #[test]
    fn test_format_units_oversized_decimals() {
        // 10^80 does not fit in a U256; everything lands in the fraction
        assert_eq!(format_units(U256::from(1u64), 80), format!("0.{}1", "0".repeat(79)));
    }
}
