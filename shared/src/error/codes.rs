//! Unified error codes for the Taberna backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Event errors
//! - 4xxx: Reservation errors
//! - 5xxx: Schedule and capacity errors
//! - 6xxx: Menu errors
//! - 7xxx: Contact request errors
//! - 8xxx: Configuration errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can match on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// Credentials missing
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,

    // ==================== 3xxx: Event ====================
    /// Event not found (or not published)
    EventNotFound = 3001,
    /// Event ends before it starts
    EventInvalidDates = 3002,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Booking would exceed the slot capacity
    CapacityExceeded = 4002,
    /// Reservation has already been cancelled
    ReservationAlreadyCancelled = 4003,
    /// Requested slot is not offered on that date
    SlotNotOffered = 4004,
    /// Restaurant is closed (or has no schedule) on that date
    DayClosed = 4005,
    /// Party size outside the accepted range
    PartySizeInvalid = 4006,

    // ==================== 5xxx: Schedule ====================
    /// Schedule day not found
    ScheduleDayNotFound = 5001,
    /// Service window is malformed (start must precede end)
    ServiceWindowInvalid = 5002,
    /// Service window already exists for that day
    ServiceWindowExists = 5003,
    /// Service window not found
    ServiceWindowNotFound = 5004,
    /// Capacity override not found
    CapacityOverrideNotFound = 5101,
    /// Capacity change would leave confirmed seats over capacity
    CapacityBelowCommitted = 5102,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item has an invalid price
    MenuItemInvalidPrice = 6002,

    // ==================== 7xxx: Contact ====================
    /// Contact request not found
    ContactNotFound = 7001,
    /// Contact request rejected (spam trap)
    ContactRejected = 7002,
    /// Message exceeds the allowed length
    MessageTooLong = 7003,

    // ==================== 8xxx: Config ====================
    /// Config key not found
    ConfigKeyNotFound = 8001,
    /// Config key in body does not match the path
    ConfigKeyMismatch = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid username or password",

            // Event
            ErrorCode::EventNotFound => "Event not found",
            ErrorCode::EventInvalidDates => "Event end must not precede its start",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::CapacityExceeded => "Slot is full",
            ErrorCode::ReservationAlreadyCancelled => "Reservation has already been cancelled",
            ErrorCode::SlotNotOffered => "Time is not within service hours",
            ErrorCode::DayClosed => "Date is not available",
            ErrorCode::PartySizeInvalid => "Party size is out of range",

            // Schedule
            ErrorCode::ScheduleDayNotFound => "Schedule day not found",
            ErrorCode::ServiceWindowInvalid => "Service window start must precede its end",
            ErrorCode::ServiceWindowExists => "Service window already exists",
            ErrorCode::ServiceWindowNotFound => "Service window not found",
            ErrorCode::CapacityOverrideNotFound => "Capacity override not found",
            ErrorCode::CapacityBelowCommitted => "Capacity is below the seats already booked",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Menu item has an invalid price",

            // Contact
            ErrorCode::ContactNotFound => "Contact request not found",
            ErrorCode::ContactRejected => "Invalid payload",
            ErrorCode::MessageTooLong => "Message is too long",

            // Config
            ErrorCode::ConfigKeyNotFound => "Config key not found",
            ErrorCode::ConfigKeyMismatch => "Config key does not match the path",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),

            // Event
            3001 => Ok(ErrorCode::EventNotFound),
            3002 => Ok(ErrorCode::EventInvalidDates),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::CapacityExceeded),
            4003 => Ok(ErrorCode::ReservationAlreadyCancelled),
            4004 => Ok(ErrorCode::SlotNotOffered),
            4005 => Ok(ErrorCode::DayClosed),
            4006 => Ok(ErrorCode::PartySizeInvalid),

            // Schedule
            5001 => Ok(ErrorCode::ScheduleDayNotFound),
            5002 => Ok(ErrorCode::ServiceWindowInvalid),
            5003 => Ok(ErrorCode::ServiceWindowExists),
            5004 => Ok(ErrorCode::ServiceWindowNotFound),
            5101 => Ok(ErrorCode::CapacityOverrideNotFound),
            5102 => Ok(ErrorCode::CapacityBelowCommitted),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),

            // Contact
            7001 => Ok(ErrorCode::ContactNotFound),
            7002 => Ok(ErrorCode::ContactRejected),
            7003 => Ok(ErrorCode::MessageTooLong),

            // Config
            8001 => Ok(ErrorCode::ConfigKeyNotFound),
            8002 => Ok(ErrorCode::ConfigKeyMismatch),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
