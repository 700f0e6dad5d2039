#![forbid(unsafe_code)]

//! Number formatting matching what browsers display.
//!
//! Rust's float formatting rounds exact ties to even; pages expect ties to
//! round away from zero (`2.5` with no decimals shows as `3`). [`to_fixed`]
//! reproduces that rule.

/// Extra digits examined past the requested precision when rounding.
const GUARD_DIGITS: usize = 30;

/// Format `value` with exactly `decimals` fractional digits, rounding half
/// away from zero.
///
/// Non-finite values render as `NaN`, `Infinity` or `-Infinity`. Negative
/// zero renders without a sign; any other negative value keeps it, even when
/// it rounds to zero.
#[must_use]
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let wide = format!("{:.*}", decimals + GUARD_DIGITS, value.abs());
    let (kept, guard) = wide.split_at(wide.len() - GUARD_DIGITS);
    let mut digits = kept.to_owned();
    if guard.as_bytes().first().is_some_and(|d| *d >= b'5') {
        digits = increment_last_digit(&digits);
    }
    if decimals == 0 {
        digits.pop(); // trailing '.'
    }

    if value < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Shortest round-trip rendering of a finite number, as used in inline style
/// values (`75`, `33.33333333333333`).
#[must_use]
pub fn to_display(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    format!("{value}")
}

fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut i = bytes.len();
    while i > 0 {
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            d => {
                bytes[i] = d + 1;
                return String::from_utf8(bytes).unwrap_or_default();
            }
        }
    }
    let mut carried = Vec::with_capacity(bytes.len() + 1);
    carried.push(b'1');
    carried.extend_from_slice(&bytes);
    String::from_utf8(carried).unwrap_or_default()
}
