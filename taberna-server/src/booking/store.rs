//! Storage seams of the booking core
//!
//! `ReservationStore` owns reservations and capacity overrides,
//! `ScheduleSource` answers which service windows a date has. Both are
//! implemented over SQLite by [`SqliteBookingStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::Reservation;
use sqlx::SqlitePool;

use super::types::{BookingResult, SlotTime};
use crate::db::repository::reservation::{self, InsertOutcome, NewReservation};
use crate::db::repository::{schedule, slot_capacity};

/// Opening state of one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub open: bool,
    /// `(start, end)` pairs with `start < end`
    pub windows: Vec<(SlotTime, SlotTime)>,
}

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find(&self, id: i64) -> BookingResult<Option<Reservation>>;

    async fn list_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Reservation>>;

    /// Sum of confirmed party sizes per slot
    async fn committed_by_slot(&self, date: NaiveDate) -> BookingResult<HashMap<SlotTime, u32>>;

    async fn capacity_overrides(&self, date: NaiveDate) -> BookingResult<HashMap<SlotTime, u32>>;

    /// Atomically check the slot's remaining capacity and insert
    async fn insert_if_capacity(
        &self,
        new: &NewReservation,
        default_capacity: u32,
    ) -> BookingResult<InsertOutcome>;

    /// Confirmed to cancelled; `false` if no confirmed row matched
    async fn cancel(&self, id: i64, reason: Option<&str>) -> BookingResult<bool>;
}

#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// `None` for a date with no schedule entry
    async fn day(&self, date: NaiveDate) -> BookingResult<Option<DaySchedule>>;
}

/// SQLite-backed implementation of both seams
#[derive(Clone)]
pub struct SqliteBookingStore {
    pool: SqlitePool,
}

impl SqliteBookingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Stored slot keys are validated on write; skip anything that slipped past
fn keyed_by_slot(rows: impl IntoIterator<Item = (String, i64)>) -> HashMap<SlotTime, u32> {
    rows.into_iter()
        .filter_map(|(slot, value)| match SlotTime::parse(&slot) {
            Some(time) => Some((time, u32::try_from(value.max(0)).unwrap_or(u32::MAX))),
            None => {
                tracing::warn!(slot = %slot, "Ignoring malformed stored slot");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ReservationStore for SqliteBookingStore {
    async fn find(&self, id: i64) -> BookingResult<Option<Reservation>> {
        Ok(reservation::find_by_id(&self.pool, id).await?)
    }

    async fn list_for_date(&self, date: NaiveDate) -> BookingResult<Vec<Reservation>> {
        Ok(reservation::list_by_date(&self.pool, &date_key(date)).await?)
    }

    async fn committed_by_slot(&self, date: NaiveDate) -> BookingResult<HashMap<SlotTime, u32>> {
        let rows = reservation::committed_by_slot(&self.pool, &date_key(date)).await?;
        Ok(keyed_by_slot(rows))
    }

    async fn capacity_overrides(&self, date: NaiveDate) -> BookingResult<HashMap<SlotTime, u32>> {
        let rows = slot_capacity::list_for_date(&self.pool, &date_key(date)).await?;
        Ok(keyed_by_slot(rows.into_iter().map(|o| (o.slot, o.capacity))))
    }

    async fn insert_if_capacity(
        &self,
        new: &NewReservation,
        default_capacity: u32,
    ) -> BookingResult<InsertOutcome> {
        let now = shared::util::now_millis();
        Ok(reservation::insert_if_capacity(&self.pool, new, i64::from(default_capacity), now).await?)
    }

    async fn cancel(&self, id: i64, reason: Option<&str>) -> BookingResult<bool> {
        let now = shared::util::now_millis();
        Ok(reservation::cancel(&self.pool, id, reason, now).await?)
    }
}

#[async_trait]
impl ScheduleSource for SqliteBookingStore {
    async fn day(&self, date: NaiveDate) -> BookingResult<Option<DaySchedule>> {
        let Some(day) = schedule::find_day(&self.pool, &date_key(date)).await? else {
            return Ok(None);
        };

        let windows = schedule::windows_for_day(&self.pool, day.id)
            .await?
            .into_iter()
            .filter_map(|w| {
                let start = SlotTime::parse(&w.start_time)?;
                let end = SlotTime::parse(&w.end_time)?;
                (start < end).then_some((start, end))
            })
            .collect();

        Ok(Some(DaySchedule {
            open: day.open,
            windows,
        }))
    }
}
