//! Core booking types: slot times, dates, errors

use std::fmt;

use chrono::NaiveDate;
use shared::error::ErrorCode;
use thiserror::Error;

/// Largest party accepted for a single reservation
pub const MAX_PARTY_SIZE: i64 = 50;

/// Booking core errors
#[derive(Debug, Error)]
pub enum BookingError {
    /// `code` narrows the failure for API clients
    #[error("Invalid argument: {message}")]
    InvalidArgument { code: ErrorCode, message: String },

    #[error("Reservation not found: {0}")]
    NotFound(String),

    #[error("Capacity exceeded: requested {requested}, remaining {remaining}")]
    CapacityExceeded { requested: u32, remaining: u32 },

    #[error("Reservation already cancelled: {0}")]
    AlreadyCancelled(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<crate::db::RepoError> for BookingError {
    fn from(err: crate::db::RepoError) -> Self {
        BookingError::Store(err.to_string())
    }
}

impl BookingError {
    pub fn invalid(code: ErrorCode, message: impl Into<String>) -> Self {
        BookingError::InvalidArgument {
            code,
            message: message.into(),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Time of day with minute precision, stored as minutes since midnight.
///
/// Orders chronologically and renders as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(u16);

impl SlotTime {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < Self::MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Strict `HH:MM` (two digits each, 00:00..=23:59)
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return None;
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let hours = u16::from(digits[0] - b'0') * 10 + u16::from(digits[1] - b'0');
        let minutes = u16::from(digits[2] - b'0') * 10 + u16::from(digits[3] - b'0');
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(Self(hours * 60 + minutes))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Strict `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> BookingResult<NaiveDate> {
    if value.len() != 10 {
        return Err(BookingError::invalid(
            ErrorCode::InvalidFormat,
            format!("invalid date: {value}"),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| BookingError::invalid(ErrorCode::InvalidFormat, format!("invalid date: {value}")))
}

pub fn parse_slot(value: &str) -> BookingResult<SlotTime> {
    SlotTime::parse(value)
        .ok_or_else(|| BookingError::invalid(ErrorCode::InvalidFormat, format!("invalid slot: {value}")))
}

/// Party size as a positive count. `max` is applied on creation only.
pub fn parse_party_size(value: i64, max: Option<i64>) -> BookingResult<u32> {
    if value < 1 {
        return Err(BookingError::invalid(
            ErrorCode::PartySizeInvalid,
            format!("party size must be positive, got {value}"),
        ));
    }
    if let Some(max) = max.filter(|&max| value > max) {
        return Err(BookingError::invalid(
            ErrorCode::PartySizeInvalid,
            format!("party size must be at most {max}, got {value}"),
        ));
    }
    u32::try_from(value).map_err(|_| {
        BookingError::invalid(
            ErrorCode::PartySizeInvalid,
            format!("party size too large: {value}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_parse_and_display() {
        let slot = SlotTime::parse("09:05").unwrap();
        assert_eq!(slot.minutes(), 545);
        assert_eq!(slot.to_string(), "09:05");
        assert_eq!(SlotTime::parse("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn test_slot_parse_rejects_malformed() {
        for bad in ["9:05", "24:00", "12:60", "12-00", "1200", "ab:cd", "12:000", ""] {
            assert!(SlotTime::parse(bad).is_none(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_slot_ordering() {
        let early = SlotTime::parse("13:00").unwrap();
        let late = SlotTime::parse("20:30").unwrap();
        assert!(early < late);
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-05-01").is_ok());
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("2026-5-1").is_err());
        assert!(parse_date("01/05/2026").is_err());
    }

    #[test]
    fn test_party_size_bounds() {
        assert_eq!(parse_party_size(4, Some(MAX_PARTY_SIZE)).unwrap(), 4);
        assert!(parse_party_size(0, None).is_err());
        assert!(parse_party_size(-3, None).is_err());
        assert!(parse_party_size(51, Some(MAX_PARTY_SIZE)).is_err());
        assert_eq!(parse_party_size(51, None).unwrap(), 51);
    }
}
