//! String to scalar conversion for every supported kind.
//!
//! Integers follow base auto-detection: `0x` hex, `0o` or a leading `0`
//! octal, `0b` binary, decimal otherwise. `_` may separate digits.

use std::num::IntErrorKind;

use chrono::TimeDelta;
use thiserror::Error;

use crate::duration;
use crate::types::FlagKind;
use crate::value::FlagValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseValueError {
    #[error("invalid syntax")]
    Syntax,

    #[error("value out of range")]
    Range,

    #[error("missing unit in duration")]
    MissingUnit,

    #[error("unknown unit '{0}' in duration")]
    UnknownUnit(String),
}

/// Parse `literal` as a value of `kind`.
pub fn parse_value(kind: FlagKind, literal: &str) -> Result<FlagValue, ParseValueError> {
    Ok(match kind {
        FlagKind::Bool => FlagValue::Bool(parse_bool(literal)?),
        FlagKind::Duration => FlagValue::Duration(parse_duration(literal)?),
        FlagKind::Float64 => FlagValue::Float64(parse_float(literal)?),
        FlagKind::Int => {
            let v = parse_int(literal)?;
            FlagValue::Int(isize::try_from(v).map_err(|_| ParseValueError::Range)?)
        }
        FlagKind::Int64 => FlagValue::Int64(parse_int(literal)?),
        FlagKind::String => FlagValue::String(literal.to_string()),
        FlagKind::Uint => {
            let v = parse_uint(literal)?;
            FlagValue::Uint(usize::try_from(v).map_err(|_| ParseValueError::Range)?)
        }
        FlagKind::Uint64 => FlagValue::Uint64(parse_uint(literal)?),
    })
}

pub fn parse_bool(s: &str) -> Result<bool, ParseValueError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseValueError::Syntax),
    }
}

pub fn parse_duration(s: &str) -> Result<TimeDelta, ParseValueError> {
    duration::parse(s)
}

pub fn parse_float(s: &str) -> Result<f64, ParseValueError> {
    let v: f64 = s.parse().map_err(|_| ParseValueError::Syntax)?;
    // Rust saturates overflowing literals to infinity.
    if v.is_infinite() {
        let body = s.trim_start_matches(['+', '-']).to_ascii_lowercase();
        if !body.starts_with("inf") {
            return Err(ParseValueError::Range);
        }
    }
    Ok(v)
}

pub fn parse_int(s: &str) -> Result<i64, ParseValueError> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let magnitude = i128::from(parse_magnitude(body)?);
    let v = if negative { -magnitude } else { magnitude };
    i64::try_from(v).map_err(|_| ParseValueError::Range)
}

pub fn parse_uint(s: &str) -> Result<u64, ParseValueError> {
    parse_magnitude(s)
}

/// Unsigned digits with an optional base prefix. Signs are rejected here.
fn parse_magnitude(s: &str) -> Result<u64, ParseValueError> {
    let (radix, digits, prefixed) = split_radix(s);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(ParseValueError::Syntax);
    }
    if !underscores_ok(digits, prefixed) {
        return Err(ParseValueError::Syntax);
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return Err(ParseValueError::Syntax);
    }
    u64::from_str_radix(&cleaned, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ParseValueError::Range,
        _ => ParseValueError::Syntax,
    })
}

fn split_radix(s: &str) -> (u32, &str, bool) {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &s[2..], true),
            b'o' | b'O' => return (8, &s[2..], true),
            b'b' | b'B' => return (2, &s[2..], true),
            _ => return (8, &s[1..], true),
        }
    }
    (10, s, false)
}

/// Every `_` must sit between two digits, or directly after a base prefix.
fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    let mut after_digit = prefixed;
    let mut last_was_underscore = false;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return false;
            }
            after_digit = false;
            last_was_underscore = true;
        } else {
            after_digit = true;
            last_was_underscore = false;
        }
    }
    !last_was_underscore
}
