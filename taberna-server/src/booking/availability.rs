//! Availability Calculator
//!
//! Pure read: remaining capacity per slot of a date for a requested party.

use std::sync::Arc;

use shared::models::{REASON_FULL, SlotAvailability};

use super::capacity::{SlotCapacityTable, remaining};
use super::schedule::SlotPlanner;
use super::store::ReservationStore;
use super::types::{BookingResult, parse_date, parse_party_size};

#[derive(Clone)]
pub struct AvailabilityCalculator {
    store: Arc<dyn ReservationStore>,
    planner: SlotPlanner,
    capacity: SlotCapacityTable,
}

impl AvailabilityCalculator {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        planner: SlotPlanner,
        capacity: SlotCapacityTable,
    ) -> Self {
        Self {
            store,
            planner,
            capacity,
        }
    }

    /// Slots of `date` in chronological order. A closed or unknown day
    /// yields an empty list.
    pub async fn compute_availability(
        &self,
        date: &str,
        party_size: i64,
    ) -> BookingResult<Vec<SlotAvailability>> {
        let date = parse_date(date)?;
        let party_size = parse_party_size(party_size, None)?;

        let slots = self.planner.slots_for(date).await?;
        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let overrides = self.store.capacity_overrides(date).await?;
        let committed = self.store.committed_by_slot(date).await?;

        Ok(slots
            .into_iter()
            .map(|slot| {
                let capacity = self.capacity.capacity(slot, &overrides);
                let left = remaining(capacity, committed.get(&slot).copied().unwrap_or(0));
                let available = left >= party_size;
                SlotAvailability {
                    slot: slot.to_string(),
                    remaining_capacity: left,
                    available,
                    reason: (!available).then(|| REASON_FULL.to_string()),
                }
            })
            .collect())
    }
}
