//! Display helpers for fixed-point amounts, rates and timestamps

use chrono::DateTime;

use crate::error::{Result, SdkError};

/// Renders a fixed-point `amount` with `decimals` fractional digits
///
/// Works on the decimal string, so every `u128` renders exactly.
///
/// ```
/// use bondkey_sdk::format::format_amount;
///
/// assert_eq!(format_amount(1_100_211, 6), "1.100211");
/// assert_eq!(format_amount(5, 3), "0.005");
/// assert_eq!(format_amount(42, 0), "42");
/// ```
#[must_use]
pub fn format_amount(amount: u128, decimals: u8) -> String {
    let digits = amount.to_string();
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{digits:0>width$}", width = decimals.saturating_add(1));
    let (whole, fraction) = padded.split_at(padded.len().saturating_sub(decimals));
    format!("{whole}.{fraction}")
}

/// Parses a decimal string into a fixed-point amount with `decimals` digits
///
/// # Errors
/// Returns an error for malformed input, more fractional digits than
/// `decimals`, or a value that does not fit in `u128`.
pub fn parse_amount(text: &str, decimals: u8) -> Result<u128> {
    let invalid = || SdkError::InvalidConfig(format!("invalid amount '{text}'"));
    let decimals = usize::from(decimals);

    let (whole, fraction) = text.trim().split_once('.').unwrap_or((text.trim(), ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > decimals {
        return Err(SdkError::InvalidConfig(format!(
            "amount '{text}' has more than {decimals} decimal places"
        )));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{whole}{fraction:0<decimals$}");
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse().map_err(|_| invalid())
}

/// Renders basis points as a percentage, e.g. `700` as `7.00%`
#[must_use]
pub fn format_bps(bps: u16) -> String {
    format!("{}%", format_amount(u128::from(bps), 2))
}

/// Renders a unix timestamp as UTC
#[must_use]
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0).map_or_else(
        || timestamp.to_string(),
        |time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}
