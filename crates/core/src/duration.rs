//! Duration parsing for flags and config files
//!
//! Accepts `0`, or one or more `<number><unit>` pairs such as `250us`,
//! `1.5ms`, `.5s` or `1m30s`. Each number is decimal with an optional
//! fraction. Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.

use crate::error::{Error, Result};
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Fraction digits beyond this cannot change the result at nanosecond precision
const MAX_FRACTION_DIGITS: usize = 24;

/// Parse a duration such as `10ms`, `1.5s` or `1m30s`
///
/// # Examples
///
/// ```
/// use castest_core::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("10ms").unwrap(), Duration::from_millis(10));
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_duration("1.5ms").unwrap(), Duration::from_micros(1500));
/// assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
/// ```
pub fn parse_duration(input: &str) -> Result<Duration> {
    let text = input.trim();
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        return Err(invalid(input, "empty duration"));
    }

    let mut total_nanos: u128 = 0;
    let mut rest = text;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after) => split_digits(after),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid(input, "expected a number"));
        }
        if tail.is_empty() {
            return Err(invalid(input, "missing unit"));
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let unit: u128 = match &tail[..unit_len] {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3_600 * NANOS_PER_SEC,
            other => return Err(invalid(input, &format!("unknown unit '{}'", other))),
        };

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| invalid(input, "number out of range"))?
        };
        let mut part = whole
            .checked_mul(unit)
            .ok_or_else(|| invalid(input, "duration overflow"))?;

        let mut numerator: u128 = 0;
        let mut scale: u128 = 1;
        for digit in fraction.bytes().take(MAX_FRACTION_DIGITS) {
            numerator = numerator * 10 + u128::from(digit - b'0');
            scale *= 10;
        }
        // Truncates below one nanosecond.
        part += numerator * unit / scale;

        total_nanos = total_nanos
            .checked_add(part)
            .ok_or_else(|| invalid(input, "duration overflow"))?;
        rest = &tail[unit_len..];
    }

    let secs = u64::try_from(total_nanos / NANOS_PER_SEC)
        .map_err(|_| invalid(input, "duration overflow"))?;
    Ok(Duration::new(secs, (total_nanos % NANOS_PER_SEC) as u32))
}

/// Split off the leading run of ASCII digits
fn split_digits(text: &str) -> (&str, &str) {
    let len = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(len)
}

fn invalid(input: &str, reason: &str) -> Error {
    Error::InvalidConfig(format!("invalid duration '{}': {}", input, reason))
}

/// Serde adapter accepting either a duration string or integer milliseconds
///
/// Use with `#[serde(deserialize_with = "castest_core::duration::deserialize")]`.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Ok(Duration::from_millis(ms)),
        Raw::Text(text) => parse_duration(&text).map_err(D::Error::custom),
    }
}
