//! Math utilities and types
//!
//! Vector alias for atlas UV coordinates, plus the lenient number parsing
//! used for template scalars and value lookups.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Parse the leading integer of `text` the way C's `atoi` does.
///
/// Leading whitespace and one optional sign are accepted, then as many
/// decimal digits as follow. Text without digits yields 0; values beyond the
/// `i32` range saturate.
pub fn parse_leading_int(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(byte - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parse the leading floating point number of `text` the way C's `atof` does.
///
/// The longest prefix (after leading whitespace) that forms a decimal number
/// with optional sign, fraction and exponent is parsed; anything else yields 0.
pub fn parse_leading_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), 42);
        assert_eq!(parse_leading_int("  -7 apples"), -7);
        assert_eq!(parse_leading_int("+3"), 3);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("12.9"), 12);
        assert_eq!(parse_leading_int("99999999999"), i32::MAX);
    }

    #[test]
    fn test_parse_leading_float() {
        assert_relative_eq!(parse_leading_float("2.5"), 2.5);
        assert_relative_eq!(parse_leading_float(" -1.25xyz"), -1.25);
        assert_relative_eq!(parse_leading_float("7."), 7.0);
        assert_relative_eq!(parse_leading_float(".5"), 0.5);
        assert_relative_eq!(parse_leading_float("1e2 hp"), 100.0);
        assert_relative_eq!(parse_leading_float("3e"), 3.0);
        assert_relative_eq!(parse_leading_float("hp"), 0.0);
        assert_relative_eq!(parse_leading_float("-"), 0.0);
    }
}
