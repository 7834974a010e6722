use std::fmt;

use crate::error::{Result, ScheduleError};
use crate::time::TimeOfDay;

/// Opaque identifier for a person, as handed over by the chat gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One user's window for a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub user_id: UserId,
    pub time_start: TimeOfDay,
    pub time_end: TimeOfDay,
    pub notes: String,
}

impl Availability {
    /// Build an entry, rejecting windows that do not end after they start.
    pub fn new(
        user_id: UserId,
        time_start: TimeOfDay,
        time_end: TimeOfDay,
        notes: impl Into<String>,
    ) -> Result<Self> {
        if time_start >= time_end {
            return Err(ScheduleError::StartNotBeforeEnd {
                start: time_start.to_string(),
                end: time_end.to_string(),
            });
        }

        Ok(Self {
            user_id,
            time_start,
            time_end,
            notes: notes.into(),
        })
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.time_start.as_clock(),
            self.time_end.as_clock()
        )?;
        if !self.notes.is_empty() {
            write!(f, " ({})", self.notes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::normalize;

    #[test]
    fn requires_start_strictly_before_end() {
        let err = Availability::new(
            "bob".into(),
            normalize("18:00").unwrap(),
            normalize("15:00").unwrap(),
            "",
        )
        .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::StartNotBeforeEnd {
                start: "1800".to_string(),
                end: "1500".to_string(),
            }
        );

        let same = Availability::new(
            "bob".into(),
            normalize("15:00").unwrap(),
            normalize("15:00").unwrap(),
            "",
        );
        assert!(matches!(same, Err(ScheduleError::StartNotBeforeEnd { .. })));
    }

    #[test]
    fn displays_as_clock_range_with_notes() {
        let entry = Availability::new(
            "bob".into(),
            normalize("15:00").unwrap(),
            normalize("18:30").unwrap(),
            "may be late",
        )
        .unwrap();
        assert_eq!(entry.to_string(), "15:00 - 18:30 (may be late)");

        let bare = Availability {
            notes: String::new(),
            ..entry
        };
        assert_eq!(bare.to_string(), "15:00 - 18:30");
    }
}
