//! ISO-8601 duration strings for span offsets.
//!
//! Offsets are held as whole milliseconds and rendered as
//! `P[nD][T[nH][nM][n[.fff]S]]`. Parsing additionally accepts years (365
//! days), months (30 days) and weeks, and fractional components with either
//! `.` or `,` as the decimal mark.

use serde::Serializer;
use std::fmt::Write;
use thiserror::Error;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Fraction digits beyond this are below a millisecond for every unit.
const MAX_FRACTION_DIGITS: usize = 12;

/// A string that is not an ISO-8601 duration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid ISO-8601 duration '{input}': {reason}")]
pub struct DurationError {
    pub input: String,
    pub reason: &'static str,
}

impl DurationError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse an ISO-8601 duration (e.g. `PT1.5S`, `P1DT2H`) into milliseconds.
///
/// Arithmetic is exact over `u64`; sub-millisecond fractions are rounded
/// half up and totals that do not fit are reported as out of range.
pub fn parse_iso_duration(input: &str) -> Result<u64, DurationError> {
    let body = input
        .strip_prefix('P')
        .ok_or_else(|| DurationError::new(input, "must start with 'P'"))?;

    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return Err(DurationError::new(input, "empty time section after 'T'"));
            }
            (date, Some(time))
        }
        None => (body, None),
    };

    let mut total: u64 = 0;
    let mut components = 0;

    for component in components_of(input, date_part)? {
        let unit = match component.designator {
            'Y' => 365 * MS_PER_DAY,
            'M' => 30 * MS_PER_DAY,
            'W' => 7 * MS_PER_DAY,
            'D' => MS_PER_DAY,
            _ => return Err(DurationError::new(input, "unknown date designator")),
        };
        total = add(input, total, component.milliseconds(input, unit)?)?;
        components += 1;
    }

    if let Some(time_part) = time_part {
        for component in components_of(input, time_part)? {
            let unit = match component.designator {
                'H' => MS_PER_HOUR,
                'M' => MS_PER_MINUTE,
                'S' => MS_PER_SECOND,
                _ => return Err(DurationError::new(input, "unknown time designator")),
            };
            total = add(input, total, component.milliseconds(input, unit)?)?;
            components += 1;
        }
    }

    if components == 0 {
        return Err(DurationError::new(input, "no components"));
    }
    Ok(total)
}

fn add(input: &str, total: u64, value: u64) -> Result<u64, DurationError> {
    total
        .checked_add(value)
        .ok_or_else(|| DurationError::new(input, "out of range"))
}

/// One `<whole>[.<fraction>]<designator>` component.
struct Component<'a> {
    whole: u64,
    fraction: &'a str,
    designator: char,
}

impl Component<'_> {
    fn milliseconds(&self, input: &str, unit: u64) -> Result<u64, DurationError> {
        let whole = self
            .whole
            .checked_mul(unit)
            .ok_or_else(|| DurationError::new(input, "out of range"))?;
        add(input, whole, fraction_of(self.fraction, unit))
    }
}

/// `unit * 0.<digits>`, rounded to the nearest millisecond.
fn fraction_of(digits: &str, unit: u64) -> u64 {
    let digits = &digits[..digits.len().min(MAX_FRACTION_DIGITS)];
    if digits.is_empty() {
        return 0;
    }
    let numerator = digits
        .bytes()
        .fold(0u128, |acc, b| acc * 10 + u128::from(b - b'0'));
    let denominator = 10u128.pow(digits.len() as u32);
    let scaled = numerator * u128::from(unit);
    // Strictly below `unit`, so it always fits back into u64.
    ((scaled * 2 + denominator) / (denominator * 2)) as u64
}

/// Split `"1H30.5M"` into its components.
fn components_of<'a>(input: &str, section: &'a str) -> Result<Vec<Component<'a>>, DurationError> {
    let mut out = Vec::new();
    let mut start = 0;

    for (at, c) in section.char_indices() {
        match c {
            '0'..='9' | '.' | ',' => {}
            designator if designator.is_ascii_uppercase() => {
                out.push(component(input, &section[start..at], designator)?);
                start = at + 1;
            }
            _ => return Err(DurationError::new(input, "unexpected character")),
        }
    }

    if start < section.len() {
        return Err(DurationError::new(input, "number without a designator"));
    }
    Ok(out)
}

fn component<'a>(
    input: &str,
    number: &'a str,
    designator: char,
) -> Result<Component<'a>, DurationError> {
    if number.is_empty() {
        return Err(DurationError::new(input, "designator without a number"));
    }
    let (whole, fraction) = match number.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };
    let malformed = whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
        || (number.len() > whole.len() && fraction.is_empty());
    if malformed {
        return Err(DurationError::new(input, "malformed number"));
    }
    let whole = whole
        .parse::<u64>()
        .map_err(|_| DurationError::new(input, "out of range"))?;
    Ok(Component {
        whole,
        fraction,
        designator,
    })
}

/// Render milliseconds as an ISO-8601 duration.
pub fn milliseconds_to_iso_duration(ms: u64) -> String {
    if ms == 0 {
        return "PT0S".to_string();
    }

    let days = ms / 86_400_000;
    let hours = (ms / 3_600_000) % 24;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1_000) % 60;
    let millis = ms % 1_000;

    let mut out = String::from("P");
    if days > 0 {
        let _ = write!(out, "{}D", days);
    }
    if hours > 0 || minutes > 0 || seconds > 0 || millis > 0 {
        out.push('T');
        if hours > 0 {
            let _ = write!(out, "{}H", hours);
        }
        if minutes > 0 {
            let _ = write!(out, "{}M", minutes);
        }
        if millis > 0 {
            let _ = write!(out, "{}.{:03}S", seconds, millis);
        } else if seconds > 0 {
            let _ = write!(out, "{}S", seconds);
        }
    }
    out
}

/// Serialize an optional millisecond offset as an ISO-8601 duration string.
pub(crate) fn serialize_offset<S: Serializer>(
    offset: &Option<u64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match offset {
        Some(ms) => serializer.serialize_str(&milliseconds_to_iso_duration(*ms)),
        None => serializer.serialize_none(),
    }
}
