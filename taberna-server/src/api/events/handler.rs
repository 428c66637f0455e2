//! Events API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{Days, NaiveDate, NaiveTime};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    DEFAULT_EVENT_PAGE, Event, EventCreated, EventDetail, EventListQuery, EventPage,
    EventPublication, EventUpsert, EventView, MAX_EVENT_PAGE,
};
use shared::util::{EVENT_PREFIX, parse_public_id, public_id};

use crate::api::{json_body, non_blank};
use crate::booking::types::parse_date;
use crate::db::repository::event::{self, EventFilter, EventRow};
use crate::error::ServiceResult;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::EventNotFound).with_detail("id", id)
}

fn parse_event_id(id: &str) -> Result<i64, AppError> {
    parse_public_id(EVENT_PREFIX, id).ok_or_else(|| not_found(id))
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
                .with_detail("field", field),
        );
    }
    Ok(value.to_string())
}

fn midnight_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Page size and offset of a listing query
fn page_bounds(query: &EventListQuery) -> Result<(i64, i64), AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_EVENT_PAGE);
    if !(1..=MAX_EVENT_PAGE).contains(&limit) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("limit must be 1..={MAX_EVENT_PAGE}"),
        )
        .with_detail("limit", limit));
    }

    let offset = match query.cursor.as_deref() {
        None => 0,
        Some(cursor) => cursor
            .parse::<i64>()
            .ok()
            .filter(|offset| *offset >= 0)
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::InvalidFormat, "invalid cursor")
                    .with_detail("cursor", cursor)
            })?,
    };
    Ok((limit, offset))
}

/// Listing filter; `to` covers its whole day
fn listing_filter(
    query: &EventListQuery,
    published: Option<bool>,
    newest_first: bool,
) -> ServiceResult<EventFilter> {
    let starts_from = match query.from.as_deref() {
        Some(from) => Some(midnight_millis(parse_date(from)?)),
        None => None,
    };
    let starts_before = match query.to.as_deref() {
        Some(to) => {
            let next_day = parse_date(to)?
                .checked_add_days(Days::new(1))
                .ok_or_else(|| AppError::with_message(ErrorCode::ValueOutOfRange, "to is out of range"))?;
            Some(midnight_millis(next_day))
        }
        None => None,
    };

    Ok(EventFilter {
        published,
        category: non_blank(query.category.clone()),
        starts_from,
        starts_before,
        newest_first,
    })
}

/// One page of events plus the cursor of the next one
async fn page<T: From<Event>>(
    state: &AppState,
    query: &EventListQuery,
    filter: EventFilter,
) -> ServiceResult<EventPage<T>> {
    let (limit, offset) = page_bounds(query)?;
    let mut rows = event::list(state.pool(), &filter, limit + 1, offset).await?;

    let next_cursor = if rows.len() as i64 > limit {
        rows.truncate(limit as usize);
        Some((offset + limit).to_string())
    } else {
        None
    };
    Ok(EventPage {
        items: rows.into_iter().map(Into::into).collect(),
        next_cursor,
    })
}

/// Check an event payload and normalize it for storage
pub fn validate_event(payload: EventUpsert, default_timezone: &str) -> Result<EventRow, AppError> {
    let date_start = payload.date_start.timestamp_millis();
    let date_end = payload.date_end.map(|end| end.timestamp_millis());
    if date_end.is_some_and(|end| end < date_start) {
        return Err(AppError::new(ErrorCode::EventInvalidDates)
            .with_detail("dateStart", payload.date_start.to_rfc3339())
            .with_detail("dateEnd", payload.date_end.map(|end| end.to_rfc3339())));
    }

    Ok(EventRow {
        title: required("title", &payload.title)?,
        date_start,
        date_end,
        timezone: non_blank(payload.timezone).unwrap_or_else(|| default_timezone.to_string()),
        description: payload.description.trim().to_string(),
        category: required("category", &payload.category)?,
        image_url: payload.image_url.trim().to_string(),
        location_name: non_blank(payload.location_name),
        is_published: payload.is_published,
    })
}

/// GET /api/v1/events
///
/// Published events in start order.
pub async fn list_published(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> ServiceResult<Json<EventPage<EventView>>> {
    let filter = listing_filter(&query, Some(true), false)?;
    Ok(Json(page(&state, &query, filter).await?))
}

/// GET /api/v1/events/{id}
pub async fn get_published(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<EventView>> {
    let row_id = parse_event_id(&id)?;
    let event = event::find(state.pool(), row_id)
        .await?
        .filter(|e| e.is_published)
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(event.into()))
}

/// GET /admin/events
///
/// Every event matching `status`, newest start first.
pub async fn list_all(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> ServiceResult<Json<EventPage<EventDetail>>> {
    let filter = listing_filter(&query, query.status.published(), true)?;
    Ok(Json(page(&state, &query, filter).await?))
}

/// POST /admin/events
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EventUpsert>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<EventCreated>)> {
    let row = validate_event(json_body(payload)?, &state.timezone)?;
    let event = event::create(state.pool(), &row, shared::util::now_millis()).await?;
    tracing::info!(id = event.id, title = %event.title, published = event.is_published, "Event created");

    Ok((
        StatusCode::CREATED,
        Json(EventCreated {
            id: public_id(EVENT_PREFIX, event.id),
        }),
    ))
}

/// PUT /admin/events/{id}
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventUpsert>, JsonRejection>,
) -> ServiceResult<Json<EventDetail>> {
    let row_id = parse_event_id(&id)?;
    let row = validate_event(json_body(payload)?, &state.timezone)?;
    let event = event::replace(state.pool(), row_id, &row, shared::util::now_millis())
        .await?
        .ok_or_else(|| not_found(&id))?;
    tracing::info!(id = event.id, "Event updated");
    Ok(Json(event.into()))
}

async fn set_published(
    state: &AppState,
    id: &str,
    published: bool,
) -> ServiceResult<Json<EventPublication>> {
    let row_id = parse_event_id(id)?;
    let event = event::set_published(state.pool(), row_id, published, shared::util::now_millis())
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id = event.id, published, "Event publication changed");
    Ok(Json(EventPublication {
        id: public_id(EVENT_PREFIX, event.id),
        is_published: event.is_published,
    }))
}

/// POST /admin/events/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<EventPublication>> {
    set_published(&state, &id, true).await
}

/// POST /admin/events/{id}/unpublish
pub async fn unpublish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<Json<EventPublication>> {
    set_published(&state, &id, false).await
}

/// DELETE /admin/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    let row_id = parse_event_id(&id)?;
    if !event::delete(state.pool(), row_id).await? {
        return Err(not_found(&id).into());
    }
    tracing::info!(id = %id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EventUpsert {
        serde_json::from_value(serde_json::json!({
            "title": "  Noche de jazz ",
            "dateStart": "2030-06-07T20:00:00+02:00",
            "dateEnd": "2030-06-07T23:00:00+02:00",
            "description": "Trío en directo",
            "category": "musica",
            "imageUrl": "https://taberna.es/jazz.jpg",
            "locationName": "  ",
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_event_normalizes() {
        let row = validate_event(payload(), "Europe/Madrid").unwrap();
        assert_eq!(row.title, "Noche de jazz");
        assert_eq!(row.date_start, 1_907_085_600_000);
        assert_eq!(row.date_end, Some(1_907_085_600_000 + 3 * 3_600_000));
        assert_eq!(row.timezone, "Europe/Madrid");
        assert_eq!(row.location_name, None);
        assert!(!row.is_published);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut p = payload();
        p.date_end = Some("2030-06-07T19:00:00+02:00".parse().unwrap());
        assert_eq!(
            validate_event(p, "Europe/Madrid").unwrap_err().code,
            ErrorCode::EventInvalidDates
        );
    }

    #[test]
    fn test_blank_category_rejected() {
        let mut p = payload();
        p.category = " ".into();
        let err = validate_event(p, "Europe/Madrid").unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_page_bounds() {
        let mut q = EventListQuery::default();
        assert_eq!(page_bounds(&q).unwrap(), (DEFAULT_EVENT_PAGE, 0));

        q.cursor = Some("40".into());
        q.limit = Some(MAX_EVENT_PAGE);
        assert_eq!(page_bounds(&q).unwrap(), (MAX_EVENT_PAGE, 40));

        q.limit = Some(0);
        assert_eq!(page_bounds(&q).unwrap_err().code, ErrorCode::ValueOutOfRange);

        q.limit = None;
        q.cursor = Some("-1".into());
        assert_eq!(page_bounds(&q).unwrap_err().code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_to_covers_whole_day() {
        let q = EventListQuery {
            from: Some("2030-06-07".into()),
            to: Some("2030-06-07".into()),
            ..Default::default()
        };
        let filter = listing_filter(&q, Some(true), false).unwrap();
        assert_eq!(filter.starts_from, Some(1_907_020_800_000));
        assert_eq!(filter.starts_before, Some(1_907_020_800_000 + 86_400_000));
    }
}
