//! `naturalize`: turn a bare string into the scalar it looks like (§4.3
//! "Fix-types", §9(c)).
//!
//! Used by the validator when a field/vtype demands a non-`str` type and
//! the parsed literal was a string; also exposed standalone since the
//! source implementation ships it as public API for callers building their
//! own fix-types-like behavior (SPEC_FULL §2).

use uxf_model::{Key, UtcOffset, UxfDate, UxfDateTime, Value};

/// Convert `s` into the most specific [`Value`] it naturally reads as:
/// `bool`, `int`, `real`, `date`, `datetime`, falling back to `Str`.
///
/// The empty string is never promoted to `Null` (§9(c) - an open question
/// the source left underspecified; this spec resolves it as `Str("")`).
pub fn naturalize(s: &str) -> Value {
    if s.is_empty() {
        return Value::Str(s.to_string());
    }
    match s {
        "yes" | "true" => return Value::Bool(true),
        "no" | "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Int(i);
    }
    if looks_numeric_real(s) {
        if let Ok(r) = s.parse::<f64>() {
            return Value::Real(r);
        }
    }
    if let Some(dt) = parse_datetime(s) {
        return Value::DateTime(dt);
    }
    if let Some(d) = parse_date(s) {
        return Value::Date(d);
    }
    Value::Str(s.to_string())
}

/// Same conversion, narrowed to the key-eligible subset, for `ktype`
/// fix-ups on map keys.
pub fn naturalize_key(s: &str) -> Key {
    match naturalize(s) {
        Value::Int(i) => Key::Int(i),
        Value::Date(d) => Key::Date(d),
        Value::DateTime(dt) => Key::DateTime(dt),
        // `bool`/`real` are not key-eligible (§3 "Key"); keep the original
        // text rather than producing an un-representable key.
        _ => Key::Str(s.to_string()),
    }
}

fn looks_numeric_real(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if !seen_exp && seen_digit => {
                seen_exp = true;
                if i + 1 < bytes.len() && (bytes[i + 1] == b'+' || bytes[i + 1] == b'-') {
                    i += 1;
                }
            }
            _ => return false,
        }
        i += 1;
    }
    seen_digit && (seen_dot || seen_exp)
}

fn digits(s: &str, start: usize, n: usize) -> Option<i64> {
    let slice = s.get(start..start + n)?;
    if !slice.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    slice.parse().ok()
}

/// `YYYY-MM-DD`, nothing else.
fn parse_date(s: &str) -> Option<UxfDate> {
    if s.len() != 10 || s.as_bytes().get(4) != Some(&b'-') || s.as_bytes().get(7) != Some(&b'-') {
        return None;
    }
    let year = digits(s, 0, 4)? as i32;
    let month = digits(s, 5, 2)? as u32;
    let day = digits(s, 8, 2)? as u32;
    UxfDate::from_ymd(year, month, day).ok()
}

/// `YYYY-MM-DDTHH:MM[:SS][Z|±HH(:MM)?]`.
fn parse_datetime(s: &str) -> Option<UxfDateTime> {
    if s.len() < 16 || s.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    let date_part = &s[..10];
    if !date_part
        .as_bytes()
        .iter()
        .enumerate()
        .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
    {
        return None;
    }
    let year = digits(s, 0, 4)? as i32;
    let month = digits(s, 5, 2)? as u32;
    let day = digits(s, 8, 2)? as u32;
    let hour = digits(s, 11, 2)? as u32;
    if s.as_bytes().get(13) != Some(&b':') {
        return None;
    }
    let minute = digits(s, 14, 2)? as u32;

    let mut rest = &s[16..];
    let mut second = 0u32;
    if let Some(stripped) = rest.strip_prefix(':') {
        second = digits(stripped, 0, 2)? as u32;
        rest = &stripped[2..];
    }

    let offset = parse_offset(rest)?;
    UxfDateTime::new(year, month, day, hour, minute, second, offset).ok()
}

fn parse_offset(s: &str) -> Option<Option<UtcOffset>> {
    if s.is_empty() {
        return Some(None);
    }
    if s == "Z" {
        return Some(Some(UtcOffset::UTC));
    }
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return None,
    };
    let hh: i32 = digits(rest, 0, 2)? as i32;
    let mm_part = rest.get(2..).unwrap_or("");
    let mm_part = mm_part.strip_prefix(':').unwrap_or(mm_part);
    let mm: i32 = if mm_part.is_empty() { 0 } else { digits(mm_part, 0, 2)? as i32 };
    UtcOffset::from_minutes(sign * (hh * 60 + mm)).ok().map(Some)
}
