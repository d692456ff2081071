//! Composite duration literals such as `7h2m3s`, `1.5h` or `-300ms`.
//!
//! A literal is an optional sign followed by one or more `<decimal><unit>`
//! components. Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`.
//! The bare literal `0` is accepted. Values are held in signed nanoseconds.

use chrono::TimeDelta;

use crate::parse::ParseValueError;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of `i64::MIN`, the largest representable span.
const MAX_MAGNITUDE: u64 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

pub fn parse(literal: &str) -> Result<TimeDelta, ParseValueError> {
    let (negative, mut rest) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(ParseValueError::Syntax);
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(ParseValueError::Syntax);
        }

        let (whole, after_whole) = leading_int(rest)?;
        let had_whole = after_whole.len() != rest.len();
        rest = after_whole;

        let mut fraction = 0u64;
        let mut scale = 1f64;
        let mut had_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (f, s, after_fraction) = leading_fraction(after_dot);
            had_fraction = after_fraction.len() != after_dot.len();
            fraction = f;
            scale = s;
            rest = after_fraction;
        }
        if !had_whole && !had_fraction {
            return Err(ParseValueError::Syntax);
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(ParseValueError::MissingUnit);
        }
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];
        let nanos =
            unit_nanos(unit).ok_or_else(|| ParseValueError::UnknownUnit(unit.to_string()))?;

        if whole > MAX_MAGNITUDE / nanos {
            return Err(ParseValueError::Range);
        }
        let mut component = whole * nanos;
        if fraction > 0 {
            // f64 is exact enough here: the fraction is below one unit.
            component += (fraction as f64 * (nanos as f64 / scale)) as u64;
            if component > MAX_MAGNITUDE {
                return Err(ParseValueError::Range);
            }
        }
        total = total
            .checked_add(component)
            .filter(|t| *t <= MAX_MAGNITUDE)
            .ok_or(ParseValueError::Range)?;
    }

    let signed = if negative {
        -i128::from(total)
    } else {
        i128::from(total)
    };
    let nanos = i64::try_from(signed).map_err(|_| ParseValueError::Range)?;
    Ok(TimeDelta::nanoseconds(nanos))
}

/// Consume leading ASCII digits as an integer.
fn leading_int(s: &str) -> Result<(u64, &str), ParseValueError> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_MAGNITUDE)
            .ok_or(ParseValueError::Range)?;
    }
    Ok((value, &s[end..]))
}

/// Consume leading digits after a decimal point. Digits past the point of
/// overflow are consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1f64;
    let mut overflow = false;
    for b in s[..end].bytes() {
        if overflow {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_MAGNITUDE)
        {
            Some(v) => {
                value = v;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }
    (value, scale, &s[end..])
}

/// Render a span in the same composite form `parse` accepts, e.g.
/// `1h2m3s`, `1.5s`, `250ms`, `0s`.
pub fn format(d: TimeDelta) -> String {
    let Some(nanos) = d.num_nanoseconds() else {
        return format!("{}s", d.num_seconds());
    };
    let negative = nanos < 0;
    let magnitude = nanos.unsigned_abs();

    let body = if magnitude < SECOND {
        if magnitude == 0 {
            return "0s".to_string();
        } else if magnitude < MICROSECOND {
            format!("{magnitude}ns")
        } else if magnitude < MILLISECOND {
            let (frac, whole) = fraction_digits(magnitude, 3);
            format!("{whole}{frac}\u{00b5}s")
        } else {
            let (frac, whole) = fraction_digits(magnitude, 6);
            format!("{whole}{frac}ms")
        }
    } else {
        let (frac, secs) = fraction_digits(magnitude, 9);
        let mut out = format!("{}{frac}s", secs % 60);
        let mins = secs / 60;
        if mins > 0 {
            out = format!("{}m{out}", mins % 60);
            let hours = mins / 60;
            if hours > 0 {
                out = format!("{hours}h{out}");
            }
        }
        out
    };

    if negative { format!("-{body}") } else { body }
}

/// Split `v` at `precision` decimal places, returning the trimmed fractional
/// part (with its leading `.`, or empty) and the whole part.
fn fraction_digits(v: u64, precision: u32) -> (String, u64) {
    let pow = 10u64.pow(precision);
    let whole = v / pow;
    let rem = v % pow;
    if rem == 0 {
        return (String::new(), whole);
    }
    let digits = format!("{rem:0width$}", width = precision as usize);
    (format!(".{}", digits.trim_end_matches('0')), whole)
}
