//! Booking core: capacity accounting per time slot
//!
//! - [`capacity`]: slot capacity table (default + date overrides)
//! - [`schedule`]: slot generation from service windows
//! - [`store`]: storage traits and the SQLite implementation
//! - [`availability`]: remaining capacity per slot
//! - [`lifecycle`]: create / get / cancel reservations

pub mod availability;
pub mod capacity;
pub mod lifecycle;
pub mod schedule;
pub mod store;
pub mod types;

use std::num::NonZeroU32;
use std::sync::Arc;

use sqlx::SqlitePool;

pub use availability::AvailabilityCalculator;
pub use capacity::SlotCapacityTable;
pub use lifecycle::ReservationManager;
pub use schedule::SlotPlanner;
pub use store::{ReservationStore, ScheduleSource, SqliteBookingStore};
pub use types::{BookingError, BookingResult, SlotTime};

/// Availability and lifecycle wired to the same store and capacity table
#[derive(Clone)]
pub struct BookingCore {
    pub availability: AvailabilityCalculator,
    pub reservations: ReservationManager,
    capacity: SlotCapacityTable,
}

impl BookingCore {
    pub fn new(pool: SqlitePool, default_capacity: NonZeroU32, interval_minutes: u16) -> Self {
        let store = Arc::new(SqliteBookingStore::new(pool));
        let planner = SlotPlanner::new(store.clone(), interval_minutes);
        let capacity = SlotCapacityTable::new(default_capacity);

        Self {
            availability: AvailabilityCalculator::new(store.clone(), planner.clone(), capacity),
            reservations: ReservationManager::new(store, planner, capacity),
            capacity,
        }
    }

    /// Capacity of a slot without a date override
    pub fn default_capacity(&self) -> u32 {
        self.capacity.default_capacity()
    }
}
