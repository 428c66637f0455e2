//! Reservation Lifecycle Manager
//!
//! `create` enforces the capacity invariant; `cancel` is the only
//! mutation after that (`CONFIRMED -> CANCELLED`, terminal).
//!
//! Creation is serialized twice: requests for the same `(date, slot)`
//! queue on an in-process lock, and the store's insert re-checks capacity
//! under the database write lock.

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use shared::error::ErrorCode;
use shared::models::{Reservation, ReservationCreate, ReservationStatus};
use shared::util::{RESERVATION_PREFIX, parse_public_id};
use tokio::sync::Mutex;
use validator::ValidateEmail;

use super::capacity::SlotCapacityTable;
use super::schedule::SlotPlanner;
use super::store::ReservationStore;
use super::types::{
    BookingError, BookingResult, MAX_PARTY_SIZE, SlotTime, parse_date, parse_party_size,
    parse_slot,
};
use crate::db::repository::reservation::{InsertOutcome, NewReservation};

type SlotKey = (NaiveDate, SlotTime);

#[derive(Clone)]
pub struct ReservationManager {
    store: Arc<dyn ReservationStore>,
    planner: SlotPlanner,
    capacity: SlotCapacityTable,
    slot_locks: Arc<DashMap<SlotKey, Arc<Mutex<()>>>>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ReservationManager {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        planner: SlotPlanner,
        capacity: SlotCapacityTable,
    ) -> Self {
        Self {
            store,
            planner,
            capacity,
            slot_locks: Arc::new(DashMap::new()),
        }
    }

    pub async fn create_reservation(&self, payload: ReservationCreate) -> BookingResult<Reservation> {
        let date = parse_date(&payload.date)?;
        let slot = parse_slot(&payload.slot)?;
        let party_size = parse_party_size(payload.party_size, Some(MAX_PARTY_SIZE))?;

        let name = payload.customer.name.trim().to_string();
        if name.is_empty() {
            return Err(BookingError::invalid(
                ErrorCode::RequiredField,
                "customer name is required",
            ));
        }
        let email = clean(payload.customer.email);
        if let Some(email) = email.as_ref().filter(|e| !e.validate_email()) {
            return Err(BookingError::invalid(
                ErrorCode::InvalidFormat,
                format!("invalid email: {email}"),
            ));
        }

        let offered = self.planner.slots_for(date).await?;
        if offered.is_empty() {
            return Err(BookingError::invalid(
                ErrorCode::DayClosed,
                format!("no service on {date}"),
            ));
        }
        if offered.binary_search(&slot).is_err() {
            return Err(BookingError::invalid(
                ErrorCode::SlotNotOffered,
                format!("{slot} is not a bookable slot on {date}"),
            ));
        }

        let new = NewReservation {
            date: date.format("%Y-%m-%d").to_string(),
            slot: slot.to_string(),
            party_size: i64::from(party_size),
            customer_name: name,
            customer_phone: clean(payload.customer.phone),
            customer_email: email,
            notes: clean(payload.notes),
        };

        let outcome = self
            .with_slot_lock((date, slot), || {
                self.store
                    .insert_if_capacity(&new, self.capacity.default_capacity())
            })
            .await?;

        match outcome {
            InsertOutcome::Created(reservation) => {
                tracing::info!(
                    reservation_id = reservation.id,
                    date = %reservation.date,
                    slot = %reservation.slot,
                    party_size = reservation.party_size,
                    "Reservation created"
                );
                Ok(reservation)
            }
            InsertOutcome::Full { remaining } => {
                let remaining = u32::try_from(remaining).unwrap_or(0);
                tracing::info!(
                    date = %new.date,
                    slot = %new.slot,
                    requested = party_size,
                    remaining,
                    "Reservation rejected, slot full"
                );
                Err(BookingError::CapacityExceeded {
                    requested: party_size,
                    remaining,
                })
            }
        }
    }

    /// Malformed ids are reported as not found
    pub async fn get_reservation(&self, id: &str) -> BookingResult<Reservation> {
        let row_id =
            parse_public_id(RESERVATION_PREFIX, id).ok_or_else(|| BookingError::NotFound(id.into()))?;
        self.store
            .find(row_id)
            .await?
            .ok_or_else(|| BookingError::NotFound(id.into()))
    }

    pub async fn cancel_reservation(
        &self,
        id: &str,
        reason: Option<String>,
    ) -> BookingResult<Reservation> {
        let existing = self.get_reservation(id).await?;
        match existing.status {
            ReservationStatus::Confirmed => {}
            ReservationStatus::Cancelled => return Err(BookingError::AlreadyCancelled(id.into())),
        }

        let reason = clean(reason);
        if !self.store.cancel(existing.id, reason.as_deref()).await? {
            // Lost a race with another cancel, or the row vanished
            let current = self.get_reservation(id).await?;
            return match current.status {
                ReservationStatus::Cancelled => Err(BookingError::AlreadyCancelled(id.into())),
                ReservationStatus::Confirmed => Err(BookingError::Store(format!(
                    "cancel of {id} matched no confirmed row"
                ))),
            };
        }

        let cancelled = self.get_reservation(id).await?;
        tracing::info!(
            reservation_id = cancelled.id,
            date = %cancelled.date,
            slot = %cancelled.slot,
            freed = cancelled.party_size,
            "Reservation cancelled"
        );
        Ok(cancelled)
    }

    /// All reservations of a date, ordered by slot then creation
    pub async fn list_reservations(&self, date: &str) -> BookingResult<Vec<Reservation>> {
        let date = parse_date(date)?;
        self.store.list_for_date(date).await
    }

    async fn with_slot_lock<F, Fut, T>(&self, key: SlotKey, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let lock = self
            .slot_locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let result = {
            let _guard = lock.lock().await;
            f().await
        };

        drop(lock);
        self.slot_locks
            .remove_if(&key, |_, l| Arc::strong_count(l) == 1);
        result
    }

    #[cfg(test)]
    fn tracked_slot_locks(&self) -> usize {
        self.slot_locks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::store::SqliteBookingStore;
    use crate::db::repository::{schedule, test_support};
    use shared::models::ReservationCustomer;
    use std::num::NonZeroU32;

    async fn manager(capacity: u32) -> ReservationManager {
        let pool = test_support::pool().await;
        let day = schedule::upsert_day(&pool, "2026-05-01", true, None).await.unwrap();
        schedule::add_window(&pool, day.id, "20:00", "22:00").await.unwrap();

        let store = Arc::new(SqliteBookingStore::new(pool));
        ReservationManager::new(
            store.clone(),
            SlotPlanner::new(store, 30),
            SlotCapacityTable::new(NonZeroU32::new(capacity).unwrap()),
        )
    }

    fn request(slot: &str, party_size: i64) -> ReservationCreate {
        ReservationCreate {
            date: "2026-05-01".into(),
            slot: slot.into(),
            party_size,
            customer: ReservationCustomer {
                name: "Ana".into(),
                phone: None,
                email: Some("ana@example.com".into()),
            },
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_full() {
        let m = manager(10).await;
        let r = m.create_reservation(request("20:00", 6)).await.unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);

        let err = m.create_reservation(request("20:00", 5)).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::CapacityExceeded {
                requested: 5,
                remaining: 4
            }
        ));
        assert_eq!(m.tracked_slot_locks(), 0);
    }

    #[tokio::test]
    async fn test_rejects_slot_outside_schedule() {
        let m = manager(10).await;

        let off_grid = m.create_reservation(request("20:15", 2)).await.unwrap_err();
        assert!(matches!(
            off_grid,
            BookingError::InvalidArgument {
                code: ErrorCode::SlotNotOffered,
                ..
            }
        ));

        let mut closed = request("20:00", 2);
        closed.date = "2026-05-02".into();
        let err = m.create_reservation(closed).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidArgument {
                code: ErrorCode::DayClosed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let m = manager(10).await;

        let too_big = m.create_reservation(request("20:00", 51)).await.unwrap_err();
        assert!(matches!(too_big, BookingError::InvalidArgument { code: ErrorCode::PartySizeInvalid, .. }));

        let mut bad_email = request("20:00", 2);
        bad_email.customer.email = Some("not-an-email".into());
        assert!(matches!(
            m.create_reservation(bad_email).await.unwrap_err(),
            BookingError::InvalidArgument { .. }
        ));

        let mut no_name = request("20:00", 2);
        no_name.customer.name = "   ".into();
        assert!(matches!(
            m.create_reservation(no_name).await.unwrap_err(),
            BookingError::InvalidArgument { .. }
        ));

        assert!(matches!(
            m.create_reservation(request("8pm", 2)).await.unwrap_err(),
            BookingError::InvalidArgument { code: ErrorCode::InvalidFormat, .. }
        ));
    }

    #[tokio::test]
    async fn test_cancel_twice() {
        let m = manager(10).await;
        let r = m.create_reservation(request("20:30", 3)).await.unwrap();
        let public = shared::util::public_id(RESERVATION_PREFIX, r.id);

        let cancelled = m
            .cancel_reservation(&public, Some("  ill  ".into()))
            .await
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(cancelled.cancel_reason.as_deref(), Some("ill"));

        let again = m.cancel_reservation(&public, None).await.unwrap_err();
        assert!(matches!(again, BookingError::AlreadyCancelled(_)));

        let stored = m.get_reservation(&public).await.unwrap();
        assert_eq!(stored.cancel_reason.as_deref(), Some("ill"));
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let m = manager(10).await;
        for id in ["resv_", "abc", "resv_999", "food_1"] {
            assert!(matches!(
                m.get_reservation(id).await.unwrap_err(),
                BookingError::NotFound(_)
            ));
            assert!(matches!(
                m.cancel_reservation(id, None).await.unwrap_err(),
                BookingError::NotFound(_)
            ));
        }
    }

    #[tokio::test]
    async fn test_list_reservations_ordered() {
        let m = manager(10).await;
        m.create_reservation(request("21:00", 2)).await.unwrap();
        m.create_reservation(request("20:00", 2)).await.unwrap();

        let listed = m.list_reservations("2026-05-01").await.unwrap();
        let slots: Vec<_> = listed.iter().map(|r| r.slot.as_str()).collect();
        assert_eq!(slots, ["20:00", "21:00"]);
    }
}
