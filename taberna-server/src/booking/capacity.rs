//! Slot Capacity Table
//!
//! Resolves the seating capacity of a slot: a date-specific override when
//! one exists, the uniform default otherwise.

use std::collections::HashMap;
use std::num::NonZeroU32;

use super::types::SlotTime;

#[derive(Debug, Clone, Copy)]
pub struct SlotCapacityTable {
    default: NonZeroU32,
}

impl SlotCapacityTable {
    pub fn new(default: NonZeroU32) -> Self {
        Self { default }
    }

    pub fn default_capacity(&self) -> u32 {
        self.default.get()
    }

    /// Capacity of `slot` given the overrides of its date
    pub fn capacity(&self, slot: SlotTime, overrides: &HashMap<SlotTime, u32>) -> u32 {
        overrides
            .get(&slot)
            .copied()
            .unwrap_or_else(|| self.default.get())
    }
}

/// Free seats, never below zero
pub fn remaining(capacity: u32, committed: u32) -> u32 {
    capacity.saturating_sub(committed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_over_default() {
        let table = SlotCapacityTable::new(NonZeroU32::new(10).unwrap());
        let eight = SlotTime::parse("20:00").unwrap();
        let nine = SlotTime::parse("21:00").unwrap();
        let overrides = HashMap::from([(eight, 4)]);

        assert_eq!(table.capacity(eight, &overrides), 4);
        assert_eq!(table.capacity(nine, &overrides), 10);
    }

    #[test]
    fn test_remaining_saturates() {
        assert_eq!(remaining(10, 6), 4);
        assert_eq!(remaining(4, 6), 0);
    }
}
