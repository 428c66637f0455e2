//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 3xxx: Event errors
/// - 4xxx: Reservation errors
/// - 5xxx: Schedule errors
/// - 6xxx: Menu errors
/// - 7xxx: Contact errors
/// - 8xxx: Configuration errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx, plus unassigned ranges)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Event errors (3xxx)
    Event,
    /// Reservation errors (4xxx)
    Reservation,
    /// Schedule and capacity errors (5xxx)
    Schedule,
    /// Menu errors (6xxx)
    Menu,
    /// Contact request errors (7xxx)
    Contact,
    /// Configuration errors (8xxx)
    Config,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Auth,
            3000..4000 => Self::Event,
            4000..5000 => Self::Reservation,
            5000..6000 => Self::Schedule,
            6000..7000 => Self::Menu,
            7000..8000 => Self::Contact,
            8000..9000 => Self::Config,
            9000.. => Self::System,
            _ => Self::General,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
