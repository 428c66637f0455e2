//! Event Models
//!
//! Start and end instants are stored as UTC epoch millis and exposed as
//! RFC 3339 timestamps. `timezone` is the IANA zone the event is announced in.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{EVENT_PREFIX, public_id};

/// Default page size of event listings
pub const DEFAULT_EVENT_PAGE: i64 = 20;
/// Largest accepted page size of event listings
pub const MAX_EVENT_PAGE: i64 = 100;

/// Event entity (row in `events`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date_start: i64,
    pub date_end: Option<i64>,
    pub timezone: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub location_name: Option<String>,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

fn instant(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub date_start: DateTime<Utc>,
    pub date_end: Option<DateTime<Utc>>,
    pub timezone: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub location_name: Option<String>,
    pub is_published: bool,
}

impl From<Event> for EventView {
    fn from(e: Event) -> Self {
        Self {
            id: public_id(EVENT_PREFIX, e.id),
            title: e.title,
            date_start: instant(e.date_start),
            date_end: e.date_end.map(instant),
            timezone: e.timezone,
            description: e.description,
            category: e.category,
            image_url: e.image_url,
            location_name: e.location_name,
            is_published: e.is_published,
        }
    }
}

/// Single event with bookkeeping timestamps (millis)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: EventView,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Event> for EventDetail {
    fn from(e: Event) -> Self {
        let (created_at, updated_at) = (e.created_at, e.updated_at);
        Self {
            event: e.into(),
            created_at,
            updated_at,
        }
    }
}

/// Page of events; `next_cursor` is absent on the last page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Create or replace payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpsert {
    pub title: String,
    pub date_start: DateTime<FixedOffset>,
    #[serde(default)]
    pub date_end: Option<DateTime<FixedOffset>>,
    /// Falls back to the restaurant timezone
    #[serde(default)]
    pub timezone: Option<String>,
    pub description: String,
    pub category: String,
    pub image_url: String,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Publication filter of the admin listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Published,
    Draft,
    #[default]
    All,
}

impl EventStatus {
    /// `is_published` value to filter on, `None` for every event
    pub fn published(self) -> Option<bool> {
        match self {
            Self::Published => Some(true),
            Self::Draft => Some(false),
            Self::All => None,
        }
    }
}

/// Listing query (`from`/`to` inclusive `YYYY-MM-DD`, `cursor` is an offset)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
}

/// Publication toggle response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPublication {
    pub id: String,
    pub is_published: bool,
}

/// Id returned after creating an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreated {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Event {
        Event {
            id: 7,
            title: "Cata de vinos".into(),
            date_start: 1_907_085_600_000,
            date_end: None,
            timezone: "Europe/Madrid".into(),
            description: "Seis vinos".into(),
            category: "cata".into(),
            image_url: "https://taberna.es/cata.jpg".into(),
            location_name: None,
            is_published: true,
            created_at: 1,
            updated_at: 2,
        }
    }

    #[test]
    fn test_detail_flattens_view() {
        let json = serde_json::to_value(EventDetail::from(row())).unwrap();
        assert_eq!(json["id"], "evt_7");
        assert_eq!(json["dateStart"], "2030-06-07T18:00:00Z");
        assert_eq!(json["dateEnd"], serde_json::Value::Null);
        assert_eq!(json["isPublished"], true);
        assert_eq!(json["updatedAt"], 2);
    }

    #[test]
    fn test_upsert_accepts_offsets() {
        let payload: EventUpsert = serde_json::from_str(
            r#"{"title":"Jazz","dateStart":"2030-06-07T20:00:00+02:00","description":"Trío",
                "category":"musica","imageUrl":"https://taberna.es/jazz.jpg"}"#,
        )
        .unwrap();
        assert_eq!(payload.date_start.timestamp_millis(), 1_907_085_600_000);
        assert!(!payload.is_published);
        assert_eq!(payload.timezone, None);
    }

    #[test]
    fn test_status_filter() {
        let q: EventListQuery = serde_json::from_str(r#"{"status":"draft"}"#).unwrap();
        assert_eq!(q.status.published(), Some(false));
        assert_eq!(EventStatus::default().published(), None);
        assert!(serde_json::from_str::<EventListQuery>(r#"{"status":"hidden"}"#).is_err());
    }
}
