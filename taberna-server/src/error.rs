//! Unified service-layer error type
//!
//! `ServiceError` bridges repository and booking errors into the API error
//! (`AppError`), so handlers can use `?` on any of them.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::booking::BookingError;
use crate::db::RepoError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: Database/infrastructure errors (logged, mapped to InternalError)
/// - `App`: Business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(what) => ServiceError::App(AppError::not_found(what)),
            RepoError::Duplicate(what) => ServiceError::App(AppError::already_exists(what)),
            RepoError::Validation(msg) => ServiceError::App(AppError::validation(msg)),
            RepoError::Database(msg) => ServiceError::Db(msg.into()),
        }
    }
}

impl From<BookingError> for ServiceError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::InvalidArgument { code, message } => {
                ServiceError::App(AppError::with_message(code, message))
            }
            BookingError::NotFound(id) => ServiceError::App(
                AppError::new(ErrorCode::ReservationNotFound).with_detail("id", id),
            ),
            BookingError::CapacityExceeded {
                requested,
                remaining,
            } => ServiceError::App(AppError::capacity_exceeded(requested, remaining)),
            BookingError::AlreadyCancelled(id) => ServiceError::App(
                AppError::new(ErrorCode::ReservationAlreadyCancelled).with_detail("id", id),
            ),
            BookingError::Store(msg) => ServiceError::Db(msg.into()),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
