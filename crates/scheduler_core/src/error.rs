use miette::Diagnostic;
use thiserror::Error;

use crate::day::Weekday;

/// Errors raised while validating or applying a schedule command.
///
/// None of these are fatal. The dispatcher sends [`ScheduleError::reply`]
/// back to the channel, so the messages are written for end users.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid format: {value}. Time expected in 00:00 format, military time.")]
    #[diagnostic(
        code(scheduler::time::invalid_format),
        help("Times are two digits, a colon, then two digits, e.g. 09:30")
    )]
    InvalidFormat { value: String },

    #[error("Invalid value: {value}. Time must be between 00:00 and 23:59 inclusive.")]
    #[diagnostic(code(scheduler::time::out_of_range))]
    OutOfRange { value: String },

    #[error("Invalid day of the week: {value}. Must be Sunday thru Saturday")]
    #[diagnostic(code(scheduler::day::invalid_day))]
    InvalidDay { value: String },

    #[error("Start time {start} must be less than end time {end}.")]
    #[diagnostic(code(scheduler::availability::start_not_before_end))]
    StartNotBeforeEnd { start: String, end: String },

    #[error("User already defined availability for {day}.")]
    #[diagnostic(
        code(scheduler::store::duplicate_availability),
        help("Use the update command to change it")
    )]
    DuplicateAvailability { day: Weekday },

    #[error("User has no availability defined for {day}.")]
    #[diagnostic(
        code(scheduler::store::availability_not_found),
        help("Use the add command to create it")
    )]
    AvailabilityNotFound { day: Weekday },

    #[error("Unrecognized command: {command}.")]
    #[diagnostic(code(scheduler::command::unrecognized))]
    UnrecognizedCommand { command: String },

    #[error("Not enough arguments for {command}: expected at least {expected}, got {actual}.")]
    #[diagnostic(code(scheduler::command::insufficient_arguments))]
    InsufficientArguments {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("No user given. Name someone with a mention, e.g. @Username, or me.")]
    #[diagnostic(code(scheduler::command::missing_user))]
    MissingUser,
}

impl ScheduleError {
    /// Reply text for the channel, pointing at follow-up commands under
    /// `prefix`.
    pub fn reply(&self, prefix: &str) -> String {
        match self {
            Self::DuplicateAvailability { .. } => {
                format!("{self} Please use [{prefix} update] instead.")
            }
            Self::AvailabilityNotFound { .. } => {
                format!("{self} Please use [{prefix} add] instead.")
            }
            Self::UnrecognizedCommand { .. } => {
                format!("{self} Type {prefix} help to see available commands")
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_names_commands_under_the_given_prefix() {
        let err = ScheduleError::DuplicateAvailability {
            day: Weekday::Sunday,
        };
        assert_eq!(
            err.reply("!avail"),
            "User already defined availability for Sunday. Please use [!avail update] instead."
        );

        let err = ScheduleError::UnrecognizedCommand {
            command: "bogus".to_string(),
        };
        assert_eq!(
            err.reply("!schedule"),
            "Unrecognized command: bogus. Type !schedule help to see available commands"
        );

        let err = ScheduleError::InvalidDay {
            value: "Funday".to_string(),
        };
        assert_eq!(err.reply("!avail"), err.to_string());
    }
}
