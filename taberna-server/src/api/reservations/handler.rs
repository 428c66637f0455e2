//! Reservation API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{ReservationCancel, ReservationCreate, ReservationView};

use crate::api::json_body;
use crate::error::ServiceResult;
use crate::state::AppState;

/// POST /api/v1/reservations
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ReservationCreate>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<ReservationView>)> {
    let payload = json_body(payload)?;
    let reservation = state.booking.reservations.create_reservation(payload).await?;
    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// GET /api/v1/reservations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<ReservationView>> {
    let reservation = state.booking.reservations.get_reservation(&id).await?;
    Ok(Json(reservation.into()))
}

/// POST /api/v1/reservations/{id}/cancel
///
/// The body is optional; when present it must be `{"reason": ...}`.
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ServiceResult<Json<ReservationView>> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ReservationCancel::default()
    } else {
        serde_json::from_slice::<ReservationCancel>(&body)
            .map_err(|e| AppError::invalid_request(format!("invalid cancel body: {e}")))?
    };

    let reservation = state
        .booking
        .reservations
        .cancel_reservation(&id, request.reason)
        .await?;
    Ok(Json(reservation.into()))
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// GET /admin/reservations?date=
pub async fn list_by_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ServiceResult<Json<Vec<ReservationView>>> {
    let date = query
        .date
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "date is required"))?;
    let reservations = state.booking.reservations.list_reservations(&date).await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}
