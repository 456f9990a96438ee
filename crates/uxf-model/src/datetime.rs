//! `Date` and `DateTime` values (§3 "Value", §4.2 "Date/time semantics").
//!
//! Grounded on `chrono`, the same crate `songroom2016-ferrum-fix`'s `fefix`
//! depends on for wire-format date/time fields: both need calendar
//! validation (leap years, day-of-month ranges) but not full IANA timezone
//! arithmetic, which §1 explicitly puts out of scope.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

/// A Gregorian calendar date, year 1-9999 (§3 "Date").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UxfDate(NaiveDate);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("date out of range: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("time out of range: {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },
    #[error("year {0} is out of the supported 1-9999 range")]
    YearOutOfRange(i32),
    #[error("invalid UTC offset: {0} minutes")]
    InvalidOffset(i32),
}

impl UxfDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateTimeError> {
        if !(1..=9999).contains(&year) {
            return Err(DateTimeError::YearOutOfRange(year));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(UxfDate)
            .ok_or(DateTimeError::InvalidDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM-DD`, the only form the writer ever produces (§6 grammar).
    pub fn to_uxf_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

/// A UTC offset retained in whole minutes, as written in the source
/// (`Z`, `±HH`, `±HH:MM`, `±HHMM` - §4.2). No DST or zone-name arithmetic
/// is performed; this is simply the signed integer the suffix encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtcOffset(i32);

impl UtcOffset {
    pub const UTC: UtcOffset = UtcOffset(0);

    pub fn from_minutes(minutes: i32) -> Result<Self, DateTimeError> {
        if !(-24 * 60..=24 * 60).contains(&minutes) {
            return Err(DateTimeError::InvalidOffset(minutes));
        }
        Ok(UtcOffset(minutes))
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }
}

/// A local date-time with an optional retained UTC offset (§3 "DateTime").
///
/// Seconds default to 0 when the source omits them; that default is
/// applied by the parser before construction, so this type always stores
/// an explicit second value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UxfDateTime {
    naive: NaiveDateTime,
    offset: Option<UtcOffset>,
}

impl UxfDateTime {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset: Option<UtcOffset>,
    ) -> Result<Self, DateTimeError> {
        if !(1..=9999).contains(&year) {
            return Err(DateTimeError::YearOutOfRange(year));
        }
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(DateTimeError::InvalidDate { year, month, day })?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(DateTimeError::InvalidTime {
            hour,
            minute,
            second,
        })?;
        Ok(UxfDateTime {
            naive: NaiveDateTime::new(date, time),
            offset,
        })
    }

    pub fn date(&self) -> UxfDate {
        UxfDate(self.naive.date())
    }

    pub fn hour(&self) -> u32 {
        self.naive.hour()
    }

    pub fn minute(&self) -> u32 {
        self.naive.minute()
    }

    pub fn second(&self) -> u32 {
        self.naive.second()
    }

    pub fn offset(&self) -> Option<UtcOffset> {
        self.offset
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    /// Canonical UXF text form: `YYYY-MM-DDTHH:MM[:SS][offset]`, omitting
    /// seconds when they are zero, matching the minimal round-trip form
    /// the writer aims for (§4.5).
    pub fn to_uxf_string(&self) -> String {
        let mut s = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.date().year(),
            self.date().month(),
            self.date().day(),
            self.hour(),
            self.minute()
        );
        if self.second() != 0 {
            s.push_str(&format!(":{:02}", self.second()));
        }
        match self.offset {
            None => {}
            Some(UtcOffset(0)) => s.push('Z'),
            Some(UtcOffset(m)) => {
                let sign = if m < 0 { '-' } else { '+' };
                let m = m.abs();
                s.push(sign);
                s.push_str(&format!("{:02}:{:02}", m / 60, m % 60));
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_date_roundtrips_to_string() {
        let date = UxfDate::from_ymd(2022, 9, 21).unwrap();
        assert_eq!(date.to_uxf_string(), "2022-09-21");
    }

    #[test]
    fn date_rejects_out_of_range_month() {
        assert!(UxfDate::from_ymd(2022, 13, 1).is_err());
    }

    #[test]
    fn date_rejects_invalid_leap_day() {
        assert!(UxfDate::from_ymd(2023, 2, 29).is_err());
        assert!(UxfDate::from_ymd(2024, 2, 29).is_ok());
    }

    #[test]
    fn date_rejects_year_zero() {
        assert!(UxfDate::from_ymd(0, 1, 1).is_err());
    }

    #[test]
    fn datetime_defaults_render_without_seconds() {
        let dt = UxfDateTime::new(2022, 9, 21, 14, 30, 0, None).unwrap();
        assert_eq!(dt.to_uxf_string(), "2022-09-21T14:30");
    }

    #[test]
    fn datetime_with_seconds_renders_them() {
        let dt = UxfDateTime::new(2022, 9, 21, 14, 30, 5, None).unwrap();
        assert_eq!(dt.to_uxf_string(), "2022-09-21T14:30:05");
    }

    #[test]
    fn datetime_with_utc_offset_renders_z() {
        let dt = UxfDateTime::new(2022, 9, 21, 14, 30, 0, Some(UtcOffset::UTC)).unwrap();
        assert_eq!(dt.to_uxf_string(), "2022-09-21T14:30Z");
    }

    #[test]
    fn datetime_with_negative_offset_renders_sign() {
        let offset = UtcOffset::from_minutes(-5 * 60 - 30).unwrap();
        let dt = UxfDateTime::new(2022, 9, 21, 14, 30, 0, Some(offset)).unwrap();
        assert_eq!(dt.to_uxf_string(), "2022-09-21T14:30-05:30");
    }

    #[test]
    fn offset_rejects_out_of_range_minutes() {
        assert!(UtcOffset::from_minutes(25 * 60).is_err());
    }
}
