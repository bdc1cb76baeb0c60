//! Display helpers for amounts, addresses and timestamps.

use chrono::{TimeZone, Utc};

use crate::types::{Amount, Timestamp, AMOUNT_DECIMALS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAmountError {
    #[error("invalid amount format: {0:?}")]
    Format(String),

    #[error("too many decimal places (at most {0})")]
    TooManyDecimals(u32),

    #[error("amount out of range")]
    Overflow,
}

/// Formats base units as a decimal string with trailing zeros trimmed.
pub fn format_amount(amount: Amount) -> String {
    let divisor = 10_i128.pow(AMOUNT_DECIMALS);
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let whole = abs / divisor as u128;
    let fractional = abs % divisor as u128;

    if fractional == 0 {
        format!("{}{}", sign, whole)
    } else {
        let formatted = format!(
            "{}{}.{:0width$}",
            sign,
            whole,
            fractional,
            width = AMOUNT_DECIMALS as usize
        );
        formatted.trim_end_matches('0').to_string()
    }
}

/// Formats base units with exactly `places` decimals, truncating the rest.
pub fn format_amount_fixed(amount: Amount, places: u32) -> String {
    let places = places.min(AMOUNT_DECIMALS);
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let divisor = 10_u128.pow(AMOUNT_DECIMALS);
    let whole = abs / divisor;
    if places == 0 {
        return format!("{}{}", sign, whole);
    }
    let fractional = (abs % divisor) / 10_u128.pow(AMOUNT_DECIMALS - places);
    format!(
        "{}{}.{:0width$}",
        sign,
        whole,
        fractional,
        width = places as usize
    )
}

/// Parses a decimal string such as `"150.5"` into base units.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (whole_str, fractional_str) = match digits.split_once('.') {
        Some((whole, fractional)) => (whole, fractional),
        None => (digits, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole_str.is_empty() && fractional_str.is_empty())
        || !all_digits(whole_str)
        || !all_digits(fractional_str)
    {
        return Err(ParseAmountError::Format(input.to_string()));
    }
    if fractional_str.len() > AMOUNT_DECIMALS as usize {
        return Err(ParseAmountError::TooManyDecimals(AMOUNT_DECIMALS));
    }

    let whole: i128 = if whole_str.is_empty() {
        0
    } else {
        whole_str.parse().map_err(|_| ParseAmountError::Overflow)?
    };
    let fractional: i128 = if fractional_str.is_empty() {
        0
    } else {
        let scale = 10_i128.pow(AMOUNT_DECIMALS - fractional_str.len() as u32);
        fractional_str
            .parse::<i128>()
            .map_err(|_| ParseAmountError::Overflow)?
            * scale
    };

    let value = whole
        .checked_mul(10_i128.pow(AMOUNT_DECIMALS))
        .and_then(|v| v.checked_add(fractional))
        .ok_or(ParseAmountError::Overflow)?;

    Ok(if negative { -value } else { value })
}

/// Shortens an address to its first six and last four characters.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Formats a second timestamp as e.g. `Nov 14, 2023 22:13 UTC`.
pub fn format_date(timestamp: Timestamp) -> String {
    match Utc.timestamp_opt(timestamp as i64, 0).single() {
        Some(datetime) => datetime.format("%b %-d, %Y %H:%M UTC").to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::usn;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(usn(100)), "100");
        assert_eq!(format_amount(1_505_000_000), "150.5");
        assert_eq!(format_amount(1_234_567_890), "123.456789");
        assert_eq!(format_amount(12_340_000), "1.234");
        assert_eq!(format_amount(-5_000_000), "-0.5");
        assert_eq!(format_amount(0), "0");
    }

    #[test]
    fn test_format_amount_fixed() {
        assert_eq!(format_amount_fixed(usn(500), 2), "500.00");
        assert_eq!(format_amount_fixed(1_505_000_000, 2), "150.50");
        assert_eq!(format_amount_fixed(1_234_567_890, 2), "123.45");
        assert_eq!(format_amount_fixed(usn(3), 0), "3");
        assert_eq!(format_amount_fixed(-usn(50), 2), "-50.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100").unwrap(), usn(100));
        assert_eq!(parse_amount("150.5").unwrap(), 1_505_000_000);
        assert_eq!(parse_amount("123.456789").unwrap(), 1_234_567_890);
        assert_eq!(parse_amount(" 15000.00 ").unwrap(), usn(15_000));
        assert_eq!(parse_amount(".5").unwrap(), 5_000_000);
        assert_eq!(parse_amount("-50").unwrap(), -usn(50));
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(matches!(parse_amount(""), Err(ParseAmountError::Format(_))));
        assert!(matches!(parse_amount("abc"), Err(ParseAmountError::Format(_))));
        assert!(matches!(parse_amount("1.2.3"), Err(ParseAmountError::Format(_))));
        assert!(matches!(parse_amount("."), Err(ParseAmountError::Format(_))));
        assert_eq!(
            parse_amount("1.123456789"),
            Err(ParseAmountError::TooManyDecimals(AMOUNT_DECIMALS))
        );
        assert_eq!(
            parse_amount(&"9".repeat(40)),
            Err(ParseAmountError::Overflow)
        );
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x742d35Cc6634C0532925a3b844Bc9e7595f8fE21"),
            "0x742d...fE21"
        );
        assert_eq!(short_address("0xB"), "0xB");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1_700_000_000), "Nov 14, 2023 22:13 UTC");
    }
}
