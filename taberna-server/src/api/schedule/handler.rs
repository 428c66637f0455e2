//! Schedule and Capacity API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CapacityOverride, CapacityOverrideUpsert, ScheduleDayUpsert, ScheduleDayView,
    ScheduleResponse, ServiceWindowParams, ServiceWindowView,
};
use shared::request::DateRangeQuery;

use crate::api::{json_body, non_blank};
use crate::booking::types::{parse_date, parse_slot};
use crate::db::RepoError;
use crate::db::repository::schedule;
use crate::db::repository::slot_capacity::{self, CapacityWrite};
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;

/// Date in canonical `YYYY-MM-DD` form
fn valid_date(value: &str) -> ServiceResult<String> {
    Ok(parse_date(value)?.format("%Y-%m-%d").to_string())
}

/// GET /api/v1/schedule
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> ServiceResult<Json<ScheduleResponse>> {
    let from = non_blank(query.from).map(|d| valid_date(&d)).transpose()?;
    let to = non_blank(query.to).map(|d| valid_date(&d)).transpose()?;

    let days = schedule::list_days(state.pool(), from.as_deref(), to.as_deref()).await?;
    let mut windows: HashMap<i64, Vec<ServiceWindowView>> = HashMap::new();
    for w in schedule::windows_in_range(state.pool(), from.as_deref(), to.as_deref()).await? {
        windows.entry(w.day_id).or_default().push(w.into());
    }

    let days = days
        .into_iter()
        .map(|day| ScheduleDayView {
            service_windows: windows.remove(&day.id).unwrap_or_default(),
            date: day.date,
            open: day.open,
            note: day.note,
        })
        .collect();

    Ok(Json(ScheduleResponse {
        timezone: state.timezone.to_string(),
        days,
    }))
}

/// POST /admin/schedule/day
pub async fn upsert_day(
    State(state): State<AppState>,
    Query(params): Query<ScheduleDayUpsert>,
) -> ServiceResult<(StatusCode, Json<ScheduleDayView>)> {
    let date = valid_date(&params.date)?;
    let note = non_blank(params.note);

    let day = schedule::upsert_day(state.pool(), &date, params.open, note.as_deref()).await?;
    let service_windows = schedule::windows_for_day(state.pool(), day.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    tracing::info!(date = %day.date, open = day.open, "Schedule day saved");

    Ok((
        StatusCode::CREATED,
        Json(ScheduleDayView {
            date: day.date,
            open: day.open,
            service_windows,
            note: day.note,
        }),
    ))
}

/// Validated `(date, start, end)` of a window mutation
fn window_bounds(params: &ServiceWindowParams) -> ServiceResult<(String, String, String)> {
    let date = valid_date(&params.date)?;
    let start = parse_slot(&params.start)?;
    let end = parse_slot(&params.end)?;
    if start >= end {
        return Err(AppError::with_message(
            ErrorCode::ServiceWindowInvalid,
            format!("window start {start} must precede end {end}"),
        )
        .into());
    }
    Ok((date, start.to_string(), end.to_string()))
}

/// POST /admin/schedule/window
///
/// A date without a schedule entry is created as an open day first.
pub async fn add_window(
    State(state): State<AppState>,
    Query(params): Query<ServiceWindowParams>,
) -> ServiceResult<(StatusCode, Json<ServiceWindowView>)> {
    let (date, start, end) = window_bounds(&params)?;
    let day = schedule::ensure_day(state.pool(), &date).await?;

    let window = schedule::add_window(state.pool(), day.id, &start, &end)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => ServiceError::App(
                AppError::new(ErrorCode::ServiceWindowExists)
                    .with_detail("start", start.clone())
                    .with_detail("end", end.clone()),
            ),
            other => other.into(),
        })?;

    tracing::info!(date = %date, start = %start, end = %end, "Service window added");
    Ok((StatusCode::CREATED, Json(window.into())))
}

/// DELETE /admin/schedule/window
pub async fn delete_window(
    State(state): State<AppState>,
    Query(params): Query<ServiceWindowParams>,
) -> ServiceResult<StatusCode> {
    let (date, start, end) = window_bounds(&params)?;
    let day = schedule::find_day(state.pool(), &date)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::ScheduleDayNotFound).with_detail("date", date.clone())
        })?;

    if !schedule::delete_window(state.pool(), day.id, &start, &end).await? {
        return Err(AppError::new(ErrorCode::ServiceWindowNotFound).into());
    }
    tracing::info!(date = %date, start = %start, end = %end, "Service window removed");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct CapacityQuery {
    pub date: String,
    #[serde(default, alias = "time")]
    pub slot: Option<String>,
}

/// GET /admin/capacity?date=
pub async fn list_capacity(
    State(state): State<AppState>,
    Query(query): Query<CapacityQuery>,
) -> ServiceResult<Json<Vec<CapacityOverride>>> {
    let date = valid_date(&query.date)?;
    Ok(Json(slot_capacity::list_for_date(state.pool(), &date).await?))
}

/// PUT /admin/capacity
pub async fn set_capacity(
    State(state): State<AppState>,
    payload: Result<Json<CapacityOverrideUpsert>, JsonRejection>,
) -> ServiceResult<Json<CapacityOverride>> {
    let payload = json_body(payload)?;
    let date = valid_date(&payload.date)?;
    let slot = parse_slot(&payload.slot)?.to_string();
    if payload.capacity < 1 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "capacity must be at least 1",
        )
        .with_detail("field", "capacity")
        .into());
    }

    let saved = match slot_capacity::upsert(
        state.pool(),
        &date,
        &slot,
        payload.capacity,
        shared::util::now_millis(),
    )
    .await?
    {
        CapacityWrite::Applied(saved) => saved,
        CapacityWrite::BelowCommitted { committed } => {
            return Err(below_committed(&date, &slot, payload.capacity, committed));
        }
    };

    tracing::info!(date = %saved.date, slot = %saved.slot, capacity = saved.capacity, "Capacity override saved");
    Ok(Json(saved))
}

fn below_committed(date: &str, slot: &str, capacity: i64, committed: i64) -> ServiceError {
    AppError::new(ErrorCode::CapacityBelowCommitted)
        .with_detail("date", date)
        .with_detail("slot", slot)
        .with_detail("capacity", capacity)
        .with_detail("committed", committed)
        .into()
}

/// DELETE /admin/capacity?date=&slot=
pub async fn delete_capacity(
    State(state): State<AppState>,
    Query(query): Query<CapacityQuery>,
) -> ServiceResult<StatusCode> {
    let date = valid_date(&query.date)?;
    let slot = query
        .slot
        .as_deref()
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "slot is required"))?;
    let slot = parse_slot(slot)?.to_string();

    let fallback = i64::from(state.booking.default_capacity());
    match slot_capacity::delete(state.pool(), &date, &slot, fallback).await? {
        CapacityWrite::Applied(true) => {
            tracing::info!(date = %date, slot = %slot, "Capacity override removed");
            Ok(StatusCode::NO_CONTENT)
        }
        CapacityWrite::Applied(false) => {
            Err(AppError::new(ErrorCode::CapacityOverrideNotFound).into())
        }
        CapacityWrite::BelowCommitted { committed } => {
            Err(below_committed(&date, &slot, fallback, committed))
        }
    }
}
