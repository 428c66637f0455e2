//! Slot generation from service windows

use std::sync::Arc;

use chrono::NaiveDate;

use super::store::ScheduleSource;
use super::types::{BookingResult, SlotTime};

/// Slots every `interval_minutes` from each window start while `< end`.
///
/// The union across windows is de-duplicated and sorted.
pub fn generate_slots(windows: &[(SlotTime, SlotTime)], interval_minutes: u16) -> Vec<SlotTime> {
    let step = interval_minutes.max(1);
    let mut slots: Vec<SlotTime> = windows
        .iter()
        .flat_map(|&(start, end)| {
            (start.minutes()..end.minutes())
                .step_by(usize::from(step))
                .filter_map(SlotTime::from_minutes)
        })
        .collect();
    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Answers which slots exist on a date
#[derive(Clone)]
pub struct SlotPlanner {
    schedule: Arc<dyn ScheduleSource>,
    interval_minutes: u16,
}

impl SlotPlanner {
    pub fn new(schedule: Arc<dyn ScheduleSource>, interval_minutes: u16) -> Self {
        Self {
            schedule,
            interval_minutes,
        }
    }

    /// Chronological slots of `date`; empty for a closed or unknown day
    pub async fn slots_for(&self, date: NaiveDate) -> BookingResult<Vec<SlotTime>> {
        match self.schedule.day(date).await? {
            Some(day) if day.open => Ok(generate_slots(&day.windows, self.interval_minutes)),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> SlotTime {
        SlotTime::parse(s).unwrap()
    }

    fn render(slots: &[SlotTime]) -> Vec<String> {
        slots.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_end_is_exclusive() {
        let slots = generate_slots(&[(t("20:00"), t("21:30"))], 30);
        assert_eq!(render(&slots), ["20:00", "20:30", "21:00"]);
    }

    #[test]
    fn test_windows_merge_sorted_without_duplicates() {
        let slots = generate_slots(
            &[(t("20:00"), t("21:00")), (t("13:00"), t("14:00")), (t("20:30"), t("21:30"))],
            30,
        );
        assert_eq!(render(&slots), ["13:00", "13:30", "20:00", "20:30", "21:00"]);
    }

    #[test]
    fn test_interval_not_dividing_window() {
        let slots = generate_slots(&[(t("12:00"), t("13:00"))], 45);
        assert_eq!(render(&slots), ["12:00", "12:45"]);
    }

    #[test]
    fn test_no_windows() {
        assert!(generate_slots(&[], 30).is_empty());
    }
}
