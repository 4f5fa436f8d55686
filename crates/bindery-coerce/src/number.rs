//! Script numbers and numeric parsing of text

use std::fmt;

/// A script number: integer or float
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer subtype
    Integer(i64),
    /// Float subtype
    Float(f64),
}

impl Number {
    /// Value as a double
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Value truncated toward zero to an integer (saturating)
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Integer(i) => i,
            Number::Float(f) => f as i64,
        }
    }

    /// Whether this is the integer subtype
    pub fn is_integer(self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) if x.is_nan() => f.write_str("nan"),
            Number::Float(x) if x.is_infinite() => {
                f.write_str(if x > 0.0 { "inf" } else { "-inf" })
            }
            Number::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{:.1}", x),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Parse text the way the script runtime converts strings to numbers.
///
/// Accepts surrounding whitespace, an optional sign, decimal integers,
/// `0x` hexadecimal integers, and decimal floats with optional exponent.
/// Decimal integers that overflow `i64` become floats. Words such as `inf`
/// or `nan` are rejected.
pub fn parse_number(bytes: &[u8]) -> Option<Number> {
    let text = std::str::from_utf8(bytes).ok()?.trim();
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if body.is_empty() || body.starts_with(['+', '-']) {
        return None;
    }

    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        // Hex literals wrap around like the runtime's integer arithmetic
        let magnitude = hex
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(16).wrapping_add(hex_digit(b)));
        let value = magnitude as i64;
        return Some(Number::Integer(if negative { value.wrapping_neg() } else { value }));
    }

    if body.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Integer(i));
        }
    }

    let well_formed = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && body.bytes().any(|b| b.is_ascii_digit());
    if !well_formed {
        return None;
    }
    let magnitude: f64 = body.parse().ok()?;
    Some(Number::Float(if negative { -magnitude } else { magnitude }))
}

fn hex_digit(b: u8) -> u64 {
    match b {
        b'0'..=b'9' => (b - b'0') as u64,
        b'a'..=b'f' => (b - b'a' + 10) as u64,
        _ => (b - b'A' + 10) as u64,
    }
}
