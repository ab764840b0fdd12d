//! Tolerant numeric coercion.
//!
//! Provider payloads and CSV exports carry numbers as JSON numbers, numeric strings,
//! decorated strings ("$1,234.50"), or not at all. Every numeric read in the
//! pipeline goes through this module so the rules live in one place.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Largest scale `rust_decimal` can represent exactly.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Parse a plain numeric string, returning `None` for empty, unparsable, or
/// non-finite input.
#[must_use]
pub fn parse_lenient(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strip everything except digits, `.` and `-`, then parse; anything unparsable is `0.0`.
#[must_use]
pub fn parse_or_zero(s: &str) -> f64 {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    parse_lenient(&cleaned).unwrap_or(0.0)
}

/// Read a JSON number or numeric string as `f64`.
#[must_use]
pub fn json_f64(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        serde_json::Value::String(s) => parse_lenient(s),
        _ => None,
    }
}

/// Read a JSON number or numeric string as a non-negative `u32` (fractions truncated).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn json_u32(v: &serde_json::Value) -> Option<u32> {
    json_f64(v)
        .filter(|f| *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

/// Divide a raw integer amount in smallest units by `10^decimals`.
///
/// Integer strings up to `i128` with at most 28 decimals are scaled exactly through
/// `Decimal`; anything else falls back to floating-point division. Returns `None`
/// when the raw value is absent, unparsable, or the result is not finite.
#[must_use]
pub fn scale_units(raw: &serde_json::Value, decimals: u32) -> Option<f64> {
    if let Some(exact) = raw.as_str().and_then(|s| scale_exact(s.trim(), decimals)) {
        return Some(exact);
    }
    let base = json_f64(raw)?;
    let divisor = 10f64.powi(i32::try_from(decimals).ok()?);
    let v = base / divisor;
    v.is_finite().then_some(v)
}

fn scale_exact(s: &str, decimals: u32) -> Option<f64> {
    if decimals > MAX_DECIMAL_SCALE {
        return None;
    }
    let int: i128 = s.parse().ok()?;
    Decimal::try_from_i128_with_scale(int, decimals)
        .ok()?
        .to_f64()
}

/// Parse a number typed by a person, accepting either `.` or `,` as the decimal
/// separator.
///
/// When both separators appear, the right-most one is the decimal point and the
/// other is a thousands separator. A lone comma followed by one or two digits is a
/// decimal comma; otherwise commas are thousands separators. Returns `None` for
/// blank or unparsable input.
#[must_use]
pub fn parse_user_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let norm = match (last_dot, last_comma) {
        (Some(d), Some(c)) => {
            let (dec, thou) = if d > c { ('.', ',') } else { (',', '.') };
            cleaned
                .chars()
                .filter(|ch| *ch != thou)
                .map(|ch| if ch == dec { '.' } else { ch })
                .collect::<String>()
        }
        (None, Some(c)) => {
            let tail = &cleaned[c + 1..];
            let decimal_comma = cleaned.matches(',').count() == 1
                && (1..=2).contains(&tail.len())
                && tail.chars().all(|ch| ch.is_ascii_digit());
            if decimal_comma {
                cleaned.replacen(',', ".", 1)
            } else {
                cleaned.replace(',', "")
            }
        }
        _ => cleaned,
    };
    parse_lenient(&norm)
}
