//! Availability Model

use serde::{Deserialize, Serialize};

/// Reason attached to a slot that cannot take the requested party
pub const REASON_FULL: &str = "FULL";

/// Remaining capacity of one slot for a requested party size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    /// `HH:MM`
    pub slot: String,
    pub remaining_capacity: u32,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// `GET /api/v1/availability` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub date: String,
    pub party_size: i64,
    pub timezone: String,
    pub slots: Vec<SlotAvailability>,
}
