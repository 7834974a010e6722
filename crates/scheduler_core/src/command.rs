//! Text command parsing and dispatch.
//!
//! A message is split on single spaces. The first token must be the prefix,
//! the second picks the sub-command, and the rest are its arguments:
//!
//! ```text
//! !schedule add <user> <day> <start> <end> [notes...]
//! !schedule update <user> <day> <start> <end> [notes...]
//! !schedule check <user>
//! !schedule available [day]
//! !schedule help
//! ```

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, info};

use crate::availability::{Availability, UserId};
use crate::day::{self, Weekday};
use crate::error::{Result, ScheduleError};
use crate::store::AvailabilityStore;
use crate::time;
use crate::usage;

pub const DEFAULT_PREFIX: &str = "!schedule";

pub const ADD_SUCCESS: &str = "Successfully added availability.";
pub const UPDATE_SUCCESS: &str = "Successfully updated availability.";

/// Token count of `<prefix> add|update <user> <day> <start> <end>`.
const WINDOW_ARITY: usize = 6;
/// Token count of `<prefix> check <user>`.
const CHECK_ARITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Add,
    Update,
    Check,
    Available,
    Help,
}

impl Command {
    const ALL: [Command; 5] = [
        Command::Add,
        Command::Update,
        Command::Check,
        Command::Available,
        Command::Help,
    ];

    fn name(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Update => "update",
            Command::Check => "check",
            Command::Available => "available",
            Command::Help => "help",
        }
    }

    fn usage(self, prefix: &str) -> String {
        match self {
            Command::Add => usage::add(prefix),
            Command::Update => usage::update(prefix),
            Command::Check => usage::check(prefix),
            Command::Available => usage::available(prefix),
            Command::Help => usage::help(prefix),
        }
    }

    fn parse(op: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(op))
            .ok_or_else(|| ScheduleError::UnrecognizedCommand {
                command: op.to_string(),
            })
    }

    fn require(self, tokens: &[&str], expected: usize) -> Result<()> {
        if tokens.len() < expected {
            return Err(ScheduleError::InsufficientArguments {
                command: self.name(),
                expected,
                actual: tokens.len(),
            });
        }
        Ok(())
    }
}

/// An empty user token comes from a doubled space after the sub-command.
fn require_user(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(ScheduleError::MissingUser);
    }
    Ok(raw)
}

/// Raw arguments of `add` and `update`, before validation.
struct WindowArgs<'a> {
    user: &'a str,
    day: &'a str,
    start: &'a str,
    end: &'a str,
    notes: String,
}

impl<'a> WindowArgs<'a> {
    fn parse(command: Command, tokens: &[&'a str]) -> Result<Self> {
        command.require(tokens, WINDOW_ARITY)?;
        Ok(Self {
            user: require_user(tokens[2])?,
            day: tokens[3],
            start: tokens[4],
            end: tokens[5],
            notes: tokens[WINDOW_ARITY..].join(" "),
        })
    }

    /// Day, then start, then end, then the window itself.
    fn validate(self) -> Result<(Weekday, Availability)> {
        let day = day::resolve(self.day)?;
        let start = time::normalize(self.start)?;
        let end = time::normalize(self.end)?;
        let entry = Availability::new(UserId::new(self.user), start, end, self.notes)?;
        Ok((day, entry))
    }
}

/// Turns command messages into store operations and reply text.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    prefix: String,
    store: Arc<AvailabilityStore>,
}

impl CommandDispatcher {
    pub fn new(store: Arc<AvailabilityStore>) -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            store,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn store(&self) -> &Arc<AvailabilityStore> {
        &self.store
    }

    /// Handle one message. `None` means the message was not addressed to the
    /// bot and nothing should be sent back.
    pub fn handle(&self, text: &str) -> Option<String> {
        let tokens: Vec<&str> = text.trim_end().split(' ').collect();
        if tokens[0] != self.prefix {
            return None;
        }

        let Some(op) = tokens.get(1) else {
            return Some(usage::help(&self.prefix));
        };

        let command = match Command::parse(op) {
            Ok(command) => command,
            Err(e) => {
                debug!("Ignoring unknown sub-command {:?}", op);
                return Some(e.reply(&self.prefix));
            }
        };

        let result = match command {
            Command::Add => self.add(&tokens).map(|()| ADD_SUCCESS.to_string()),
            Command::Update => self.update(&tokens).map(|()| UPDATE_SUCCESS.to_string()),
            Command::Check => self.check(&tokens),
            Command::Available => self.available(&tokens),
            Command::Help => Ok(usage::help(&self.prefix)),
        };

        Some(result.unwrap_or_else(|e| {
            debug!("{} command rejected: {}", command.name(), e);
            format!("{}\n{}", e.reply(&self.prefix), command.usage(&self.prefix))
        }))
    }

    fn add(&self, tokens: &[&str]) -> Result<()> {
        let (day, entry) = WindowArgs::parse(Command::Add, tokens)?.validate()?;
        let user = entry.user_id.clone();
        self.store.add(day, entry)?;
        info!("Added availability for {} on {}", user, day);
        Ok(())
    }

    fn update(&self, tokens: &[&str]) -> Result<()> {
        let (day, entry) = WindowArgs::parse(Command::Update, tokens)?.validate()?;
        let user = entry.user_id.clone();
        self.store.update(day, entry)?;
        info!("Updated availability for {} on {}", user, day);
        Ok(())
    }

    fn check(&self, tokens: &[&str]) -> Result<String> {
        Command::Check.require(tokens, CHECK_ARITY)?;
        let user = UserId::new(require_user(tokens[2])?);

        let entries = self.store.availability_for(&user);
        if entries.is_empty() {
            return Ok(format!("{} has no availability recorded.", user));
        }

        let mut reply = format!("Availability for {}:", user);
        for (day, entry) in entries {
            let _ = write!(reply, "\n{}: {}", day, entry);
        }
        Ok(reply)
    }

    fn available(&self, tokens: &[&str]) -> Result<String> {
        match tokens.get(2) {
            Some(raw) => {
                let day = day::resolve(raw)?;
                let entries = self.store.query(day);
                if entries.is_empty() {
                    return Ok(format!("No availability recorded for {}.", day));
                }
                let mut reply = format!("Availability for {}:", day);
                write_entries(&mut reply, &entries);
                Ok(reply)
            }
            None => {
                let mut reply = String::from("Availability for the week:");
                let mut any = false;
                for day in Weekday::ALL {
                    let entries = self.store.query(day);
                    if entries.is_empty() {
                        continue;
                    }
                    any = true;
                    let _ = write!(reply, "\n**{}**", day);
                    write_entries(&mut reply, &entries);
                }
                if !any {
                    return Ok("No availability recorded.".to_string());
                }
                Ok(reply)
            }
        }
    }
}

fn write_entries(reply: &mut String, entries: &[Availability]) {
    for entry in entries {
        let _ = write!(reply, "\n{}: {}", entry.user_id, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::new(Arc::new(AvailabilityStore::new()))
    }

    #[test]
    fn ignores_messages_without_prefix() {
        let d = dispatcher();
        assert_eq!(d.handle("hello there"), None);
        assert_eq!(d.handle(""), None);
        assert_eq!(d.handle("!schedules add"), None);
        assert_eq!(d.handle(" !schedule add"), None);
    }

    #[test]
    fn bare_prefix_and_help_reply_with_help() {
        let d = dispatcher();
        let help = usage::help(DEFAULT_PREFIX);
        assert_eq!(d.handle("!schedule"), Some(help.clone()));
        assert_eq!(d.handle("!schedule\n"), Some(help.clone()));
        assert_eq!(d.handle("!schedule HELP"), Some(help));
    }

    #[test]
    fn custom_prefix() {
        let d = dispatcher().with_prefix("!avail");
        assert_eq!(d.prefix(), "!avail");
        assert_eq!(d.handle("!schedule help"), None);
        assert_eq!(d.handle("!avail help"), Some(usage::help("!avail")));
    }

    #[test]
    fn custom_prefix_is_named_in_every_reply() {
        let d = dispatcher().with_prefix("!avail");
        assert_eq!(d.handle("!avail add me Sunday 15:00 18:00").as_deref(), Some(ADD_SUCCESS));

        let replies = [
            d.handle("!avail").unwrap(),
            d.handle("!avail help").unwrap(),
            d.handle("!avail bogus").unwrap(),
            d.handle("!avail add me Sunday 16:00 18:00").unwrap(),
            d.handle("!avail update me Monday 16:00 18:00").unwrap(),
            d.handle("!avail check").unwrap(),
            d.handle("!avail available Funday").unwrap(),
        ];
        for reply in &replies {
            assert!(reply.contains("!avail"), "{reply}");
            assert!(!reply.contains("!schedule"), "{reply}");
        }

        assert_eq!(
            replies[2],
            "Unrecognized command: bogus. Type !avail help to see available commands"
        );
        assert!(replies[3].starts_with(
            "User already defined availability for Sunday. Please use [!avail update] instead.\n"
        ));
        assert!(replies[4].starts_with(
            "User has no availability defined for Monday. Please use [!avail add] instead.\n"
        ));
    }

    #[test]
    fn empty_user_token_is_rejected() {
        let tokens = ["!schedule", "add", "", "Sunday", "15:00", "18:00"];
        assert!(matches!(
            WindowArgs::parse(Command::Add, &tokens),
            Err(ScheduleError::MissingUser)
        ));
        assert_eq!(
            dispatcher().check(&["!schedule", "check", ""]),
            Err(ScheduleError::MissingUser)
        );
    }

    #[test]
    fn command_keywords_are_case_insensitive() {
        assert_eq!(Command::parse("ADD"), Ok(Command::Add));
        assert_eq!(Command::parse("Update"), Ok(Command::Update));
        assert_eq!(Command::parse("cHeCk"), Ok(Command::Check));
        assert_eq!(
            Command::parse("remove"),
            Err(ScheduleError::UnrecognizedCommand {
                command: "remove".to_string()
            })
        );
    }

    #[test]
    fn window_args_join_notes() {
        let tokens = [
            "!schedule", "add", "@bob", "Sunday", "15:00", "18:00", "may", "be", "late",
        ];
        let args = WindowArgs::parse(Command::Add, &tokens).unwrap();
        assert_eq!(args.user, "@bob");
        assert_eq!(args.notes, "may be late");

        let short = ["!schedule", "add", "@bob", "Sunday", "15:00"];
        assert!(matches!(
            WindowArgs::parse(Command::Add, &short),
            Err(ScheduleError::InsufficientArguments {
                command: "add",
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn validation_checks_day_first() {
        let tokens = ["!schedule", "add", "@bob", "Someday", "99:99", "xx"];
        let err = WindowArgs::parse(Command::Add, &tokens)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDay { .. }));
    }

    #[test]
    fn validation_checks_start_before_end_token() {
        let tokens = ["!schedule", "add", "@bob", "Monday", "29:00", "bad"];
        let err = WindowArgs::parse(Command::Add, &tokens)
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::OutOfRange {
                value: "2900".to_string()
            }
        );
    }
}
