use std::time::Duration;

use crate::error::{Result, ShredError};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Binary units, largest last. Each step is 1024 times the previous one.
const SIZE_UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Parse a byte count such as "4096", "512K", "10MiB" or "1.5G".
///
/// Suffixes are binary and case-insensitive; "K", "KB" and "KiB" all mean
/// 1024 bytes.
pub(crate) fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim();
    let invalid = |reason: String| ShredError::InvalidSize(s.to_string(), reason);

    if let Ok(bytes) = s.parse::<u64>() {
        return Ok(bytes);
    }

    let (num_part, suffix) =
        split_number_suffix(s).ok_or_else(|| invalid("No number found".to_string()))?;
    let exponent = size_exponent(suffix)
        .ok_or_else(|| invalid(format!("Unknown size suffix: {suffix}")))?;

    let value: f64 = num_part
        .trim()
        .parse()
        .map_err(|_| invalid("Invalid number format".to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid("Size must be a non-negative number".to_string()));
    }

    Ok((value * 1024_f64.powi(exponent)) as u64)
}

/// Power of 1024 named by a size suffix.
fn size_exponent(suffix: &str) -> Option<i32> {
    let upper = suffix.to_ascii_uppercase();
    let prefix = upper
        .strip_suffix("IB")
        .or_else(|| upper.strip_suffix('B'))
        .unwrap_or(&upper);

    match prefix {
        "" => Some(0),
        "K" => Some(1),
        "M" => Some(2),
        "G" => Some(3),
        "T" => Some(4),
        _ => None,
    }
}

/// Parse a duration like "90s", "30m", "1h30m" or "7d".
///
/// A bare number is taken as seconds.
pub(crate) fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let invalid = |reason: &str| ShredError::InvalidDuration(s.to_string(), reason.to_string());

    if s.is_empty() {
        return Err(invalid("No number found"));
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let (num_part, tail) = split_number_suffix(rest).ok_or_else(|| invalid("No number found"))?;
        let unit_len = tail
            .char_indices()
            .find(|(_, ch)| !ch.is_alphabetic())
            .map_or(tail.len(), |(i, _)| i);
        let (unit, remainder) = tail.split_at(unit_len);

        let value: u64 = num_part
            .parse()
            .map_err(|_| invalid("Invalid number format"))?;
        let unit_secs = match unit.to_lowercase().as_str() {
            "s" | "sec" | "secs" => 1,
            "m" | "min" | "mins" => MINUTE,
            "h" | "hr" | "hrs" => HOUR,
            "d" | "day" | "days" => DAY,
            "w" | "wk" | "wks" => WEEK,
            "" => return Err(invalid("Missing unit after number")),
            other => return Err(invalid(&format!("Unknown duration unit: {other}"))),
        };

        let secs = value
            .checked_mul(unit_secs)
            .ok_or_else(|| invalid("Duration overflows"))?;
        total = total
            .checked_add(Duration::from_secs(secs))
            .ok_or_else(|| invalid("Duration overflows"))?;
        rest = remainder;
    }

    Ok(total)
}

/// Split a string into its leading number and the remainder.
fn split_number_suffix(s: &str) -> Option<(&str, &str)> {
    let split_pos = s.find(char::is_alphabetic).unwrap_or(s.len());
    let (num, suffix) = s.split_at(split_pos);
    (!num.is_empty()).then_some((num, suffix))
}

/// Format a byte count in the largest binary unit it reaches, e.g. "1.5 KiB".
pub(crate) fn format_size(bytes: u64) -> String {
    let exponent = (1..SIZE_UNITS.len())
        .rev()
        .find(|&exp| bytes >= 1u64 << (10 * exp))
        .unwrap_or(0);

    if exponent == 0 {
        return format!("{bytes} B");
    }
    let scaled = bytes as f64 / (1u64 << (10 * exponent)) as f64;
    format!("{scaled:.1} {}", SIZE_UNITS[exponent])
}

/// Format a duration using the largest whole units, e.g. "1h30m".
pub(crate) fn format_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    if secs == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    for (unit, label) in [(DAY, "d"), (HOUR, "h"), (MINUTE, "m"), (1, "s")] {
        if secs >= unit {
            out.push_str(&format!("{}{label}", secs / unit));
            secs %= unit;
        }
    }
    out
}
