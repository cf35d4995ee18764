//! Display helpers for wire values that arrive as strings.
//!
//! None of these panic: anything that does not parse turns into `PLACEHOLDER`.

use chrono::{DateTime, Utc};

pub const PLACEHOLDER: &str = "--";

const DISPLAY_DECIMALS: u32 = 4;

/// Scale a smallest-unit integer string by `decimals` and show 4 fractional digits,
/// rounding half up. Exact integer arithmetic, no floats.
pub fn format_amount(amount: &str, decimals: Option<u32>) -> String {
    let Some(decimals) = decimals else {
        return PLACEHOLDER.to_string();
    };

    let amount = amount.trim();
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return PLACEHOLDER.to_string();
    }

    scaled_amount(amount, decimals)
        .map(|scaled| {
            let unit = 10u128.pow(DISPLAY_DECIMALS);
            format!(
                "{}.{:0width$}",
                scaled / unit,
                scaled % unit,
                width = DISPLAY_DECIMALS as usize
            )
        })
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `amount / 10^decimals`, expressed in units of 10^-4
fn scaled_amount(amount: &str, decimals: u32) -> Option<u128> {
    let raw: u128 = amount.parse().ok()?;

    if decimals >= DISPLAY_DECIMALS {
        let divisor = 10u128.checked_pow(decimals - DISPLAY_DECIMALS)?;
        let quotient = raw / divisor;
        let remainder = raw % divisor;
        if remainder.checked_mul(2)? >= divisor && divisor > 1 {
            quotient.checked_add(1)
        } else {
            Some(quotient)
        }
    } else {
        raw.checked_mul(10u128.checked_pow(DISPLAY_DECIMALS - decimals)?)
    }
}

/// Unix seconds as a UTC date and time
pub fn format_timestamp(seconds: &str) -> String {
    seconds
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Shorten long hashes and addresses to `head...tail` for narrow columns
pub fn shorten(value: &str, keep: usize) -> String {
    let value = value.trim();
    if value.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= keep * 2 + 3 {
        return value.to_string();
    }

    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}...{}", head, tail)
}
