//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::AvailabilityResponse;

use crate::error::ServiceResult;
use crate::state::AppState;

/// Raw query; both values are validated by the booking core
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub date: Option<String>,
    pub party_size: Option<String>,
}

/// GET /api/v1/availability
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> ServiceResult<Json<AvailabilityResponse>> {
    let date = query
        .date
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "date is required"))?;
    let party_size: i64 = query
        .party_size
        .as_deref()
        .unwrap_or("")
        .trim()
        .parse()
        .map_err(|_| {
            AppError::with_message(
                ErrorCode::PartySizeInvalid,
                "partySize must be a positive integer",
            )
        })?;

    let slots = state
        .booking
        .availability
        .compute_availability(&date, party_size)
        .await?;

    Ok(Json(AvailabilityResponse {
        date,
        party_size,
        timezone: state.timezone.to_string(),
        slots,
    }))
}
