//! Scheduler Discord - Discord gateway for the scheduler bot
//!
//! Listens for messages in the `scheduler` text channel, hands them to the
//! [`CommandDispatcher`](scheduler_core::CommandDispatcher) and posts the
//! replies back.

pub mod bot;
pub mod error;
pub mod gateway;

pub use bot::{DiscordBotConfig, SchedulerBot, create_discord_client, run_discord_bot};
pub use error::{DiscordError, Result};

// Re-export serenity for convenience
pub use serenity;
