//! Reservation Model

use serde::{Deserialize, Serialize};

use crate::util::{RESERVATION_PREFIX, public_id};

/// Reservation lifecycle state.
///
/// `Confirmed` is the only initial state; `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Reservation entity (row in `reservations`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub slot: String,
    pub party_size: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub cancel_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Customer contact attached to a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCustomer {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub date: String,
    #[serde(alias = "time")]
    pub slot: String,
    pub party_size: i64,
    pub customer: ReservationCustomer,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Cancel reservation payload (body is optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationCancel {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Reservation as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: String,
    pub status: ReservationStatus,
    pub date: String,
    pub slot: String,
    pub party_size: i64,
    pub customer: ReservationCustomer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Reservation> for ReservationView {
    fn from(r: Reservation) -> Self {
        Self {
            id: public_id(RESERVATION_PREFIX, r.id),
            status: r.status,
            date: r.date,
            slot: r.slot,
            party_size: r.party_size,
            customer: ReservationCustomer {
                name: r.customer_name,
                phone: r.customer_phone,
                email: r.customer_email,
            },
            notes: r.notes,
            cancel_reason: r.cancel_reason,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
