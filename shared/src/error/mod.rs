//! Unified error system for the Taberna backend
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error body rendered to HTTP clients
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Event errors
//! - 4xxx: Reservation errors
//! - 5xxx: Schedule errors
//! - 6xxx: Menu errors
//! - 7xxx: Contact errors
//! - 8xxx: Configuration errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::CapacityExceeded);
//! assert_eq!(err.http_status().as_u16(), 409);
//!
//! let err = AppError::validation("partySize must be positive")
//!     .with_detail("field", "partySize");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
