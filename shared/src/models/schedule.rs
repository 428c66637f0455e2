//! Schedule Models (days, service windows, capacity overrides)

use serde::{Deserialize, Serialize};

/// Schedule day entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ScheduleDay {
    pub id: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub open: bool,
    pub note: Option<String>,
}

/// Service window entity (`start_time` < `end_time`, both `HH:MM`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServiceWindow {
    pub id: i64,
    pub day_id: i64,
    pub start_time: String,
    pub end_time: String,
}

/// Service window as exposed by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWindowView {
    pub start: String,
    pub end: String,
}

impl From<ServiceWindow> for ServiceWindowView {
    fn from(w: ServiceWindow) -> Self {
        Self {
            start: w.start_time,
            end: w.end_time,
        }
    }
}

/// Schedule day with its windows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDayView {
    pub date: String,
    pub open: bool,
    pub service_windows: Vec<ServiceWindowView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// `GET /api/v1/schedule` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub timezone: String,
    pub days: Vec<ScheduleDayView>,
}

/// Upsert schedule day (query parameters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDayUpsert {
    pub date: String,
    #[serde(default = "default_open")]
    pub open: bool,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_open() -> bool {
    true
}

/// Service window mutation (query parameters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceWindowParams {
    pub date: String,
    pub start: String,
    pub end: String,
}

/// Date-specific capacity override for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CapacityOverride {
    pub date: String,
    pub slot: String,
    pub capacity: i64,
    pub updated_at: i64,
}

/// Set capacity override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityOverrideUpsert {
    pub date: String,
    #[serde(alias = "time")]
    pub slot: String,
    pub capacity: i64,
}
