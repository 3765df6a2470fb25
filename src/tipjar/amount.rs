//! Parsing the ETH amount a user types.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use thiserror::Error;

/// Most fractional digits an ether amount can carry (wei precision).
pub const MAX_DECIMALS: usize = 18;

/// Why an amount was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("'{0}' is not a decimal number")]
    NotANumber(String),
    #[error("'{0}' has more than 18 decimal places")]
    TooPrecise(String),
    #[error("amount must be greater than zero")]
    NotPositive,
}

/// Parse a positive decimal ether amount into wei.
///
/// Accepts plain decimals such as `1`, `0.05` or `.5`. Signs, exponents and
/// anything finer than one wei are refused.
pub fn parse_amount(text: &str) -> Result<U256, AmountError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits_only(whole) || !digits_only(fraction) || (whole.is_empty() && fraction.is_empty()) {
        return Err(AmountError::NotANumber(text.to_string()));
    }
    if fraction.len() > MAX_DECIMALS {
        return Err(AmountError::TooPrecise(text.to_string()));
    }

    let normalized = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    let wei = parse_ether(&normalized).map_err(|_| AmountError::NotANumber(text.to_string()))?;
    if wei.is_zero() {
        return Err(AmountError::NotPositive);
    }
    Ok(wei)
}
