//! In-memory availability, bucketed by weekday.
//!
//! Each day has its own lock. Duplicate checks and in-place updates run
//! under the bucket's lock, so concurrent commands for the same user and day
//! cannot both succeed.

use parking_lot::Mutex;

use crate::availability::{Availability, UserId};
use crate::day::Weekday;
use crate::error::{Result, ScheduleError};

#[derive(Debug, Default)]
pub struct AvailabilityStore {
    days: [Mutex<Vec<Availability>>; 7],
}

impl AvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, day: Weekday) -> &Mutex<Vec<Availability>> {
        &self.days[day.index()]
    }

    /// Append `entry` to `day`, unless its user already has a window that day.
    pub fn add(&self, day: Weekday, entry: Availability) -> Result<()> {
        let mut entries = self.bucket(day).lock();
        if entries.iter().any(|e| e.user_id == entry.user_id) {
            return Err(ScheduleError::DuplicateAvailability { day });
        }
        entries.push(entry);
        Ok(())
    }

    /// Replace the existing window of `entry`'s user on `day`, keeping its
    /// position in the day's list.
    pub fn update(&self, day: Weekday, entry: Availability) -> Result<()> {
        let mut entries = self.bucket(day).lock();
        let existing = entries
            .iter_mut()
            .find(|e| e.user_id == entry.user_id)
            .ok_or(ScheduleError::AvailabilityNotFound { day })?;
        *existing = entry;
        Ok(())
    }

    /// Snapshot of `day`'s entries in insertion order.
    pub fn query(&self, day: Weekday) -> Vec<Availability> {
        self.bucket(day).lock().clone()
    }

    /// Every window recorded for `user`, Sunday first.
    pub fn availability_for(&self, user: &UserId) -> Vec<(Weekday, Availability)> {
        Weekday::ALL
            .into_iter()
            .filter_map(|day| {
                self.bucket(day)
                    .lock()
                    .iter()
                    .find(|e| &e.user_id == user)
                    .map(|e| (day, e.clone()))
            })
            .collect()
    }
}
