//! Fixed-point conversion between decimal amounts and 18-decimal smallest units.

use alloy::primitives::{
    U256,
    utils::{ParseUnits, format_ether, parse_units},
};
use color_eyre::eyre::{Result, WrapErr};

/// Decimals used by both the native currency and the token.
pub const DECIMALS: u8 = 18;

/// Parse a decimal amount into smallest units.
///
/// Returns `Ok(None)` for blank, zero or negative amounts, which callers treat
/// as "nothing to do". Malformed text is an error.
pub fn parse_amount(amount: &str) -> Result<Option<U256>> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Ok(None);
    }

    let parsed = parse_units(amount, DECIMALS)
        .wrap_err_with(|| format!("invalid amount: {amount:?}"))?;

    Ok(match parsed {
        ParseUnits::U256(value) if !value.is_zero() => Some(value),
        ParseUnits::U256(_) | ParseUnits::I256(_) => None,
    })
}

/// Format smallest units as a decimal string.
///
/// Trailing zeros are trimmed but one fractional digit is always kept,
/// so one whole unit renders as `1.0`.
pub fn format_balance(value: U256) -> String {
    let full = format_ether(value);
    match full.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                format!("{int}.0")
            } else {
                format!("{int}.{frac}")
            }
        }
        None => format!("{full}.0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_ether() {
        let value = parse_amount("1").unwrap().unwrap();
        assert_eq!(value, U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(value.to_string(), "1000000000000000000");
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(
            parse_amount("0.5").unwrap(),
            Some(U256::from(500_000_000_000_000_000u128))
        );
        assert_eq!(parse_amount(" 0.000000000000000001 ").unwrap(), Some(U256::from(1u64)));
    }

    #[test]
    fn test_parse_non_positive() {
        assert_eq!(parse_amount("").unwrap(), None);
        assert_eq!(parse_amount("   ").unwrap(), None);
        assert_eq!(parse_amount("0").unwrap(), None);
        assert_eq!(parse_amount("0.0").unwrap(), None);
        assert_eq!(parse_amount("-1").unwrap(), None);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("1x").is_err());
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(U256::ZERO), "0.0");
        assert_eq!(format_balance(U256::from(1_000_000_000_000_000_000u128)), "1.0");
        assert_eq!(format_balance(U256::from(500_000_000_000_000_000u128)), "0.5");
        assert_eq!(
            format_balance(U256::from(12_345_000_000_000_000_000u128)),
            "12.345"
        );
        assert_eq!(format_balance(U256::from(1u64)), "0.000000000000000001");
    }
}
