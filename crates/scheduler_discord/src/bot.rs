use std::future::Future;
use std::sync::OnceLock;

use scheduler_core::CommandDispatcher;
use serenity::{
    all::GatewayIntents,
    async_trait,
    client::{Client, Context, EventHandler},
    model::{
        channel::{Channel, ChannelType, Message},
        gateway::Ready,
        id::UserId,
    },
};
use tracing::{debug, error, info, warn};

use crate::error::{DiscordError, Result};
use crate::gateway::{self, MAX_MESSAGE_LENGTH};

/// Name of the only channel the bot reads commands from.
pub const DEFAULT_CHANNEL_NAME: &str = "scheduler";

/// Configuration for the Discord bot
#[derive(Debug, Clone)]
pub struct DiscordBotConfig {
    pub token: String,
    pub channel_name: String,
    pub intents: GatewayIntents,
}

impl DiscordBotConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            intents: GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT,
        }
    }

    pub fn with_channel_name(mut self, channel_name: impl Into<String>) -> Self {
        self.channel_name = channel_name.into();
        self
    }

    pub fn with_intents(mut self, intents: GatewayIntents) -> Self {
        self.intents = intents;
        self
    }
}

/// Event handler that feeds `scheduler` channel messages to the dispatcher
pub struct SchedulerBot {
    dispatcher: CommandDispatcher,
    channel_name: String,
    /// Filled in on `ready`, used to ignore our own replies.
    bot_user: OnceLock<UserId>,
}

impl SchedulerBot {
    pub fn new(dispatcher: CommandDispatcher, channel_name: impl Into<String>) -> Self {
        Self {
            dispatcher,
            channel_name: channel_name.into(),
            bot_user: OnceLock::new(),
        }
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    fn is_own_message(&self, author: UserId) -> bool {
        self.bot_user.get() == Some(&author)
    }

    /// Reply for a message posted by `author` in a channel of `kind` named
    /// `channel_name`, or `None` when the bot should stay quiet.
    pub fn respond(
        &self,
        kind: ChannelType,
        channel_name: &str,
        author: UserId,
        content: &str,
    ) -> Option<String> {
        if self.is_own_message(author) {
            return None;
        }
        if !gateway::is_scheduler_channel(kind, channel_name, &self.channel_name) {
            return None;
        }

        let content = gateway::resolve_user_alias(content, self.dispatcher.prefix(), author.get());
        self.dispatcher.handle(&content)
    }

    /// Kind and name of a guild channel; `None` for DMs.
    async fn channel_of(
        &self,
        ctx: &Context,
        msg: &Message,
    ) -> Result<Option<(ChannelType, String)>> {
        let channel = msg.channel_id.to_channel(ctx).await.map_err(|cause| {
            DiscordError::ChannelLookupFailed {
                channel_id: msg.channel_id.to_string(),
                cause,
            }
        })?;

        Ok(match channel {
            Channel::Guild(guild_channel) => Some((guild_channel.kind, guild_channel.name)),
            _ => None,
        })
    }

    async fn send_reply(&self, ctx: &Context, msg: &Message, reply: &str) -> Result<()> {
        for chunk in gateway::split_message(reply, MAX_MESSAGE_LENGTH) {
            msg.channel_id
                .say(&ctx.http, &chunk)
                .await
                .map_err(|cause| DiscordError::MessageSendFailed {
                    destination: msg.channel_id.to_string(),
                    message_length: chunk.len(),
                    cause,
                })?;
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler for SchedulerBot {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        // Reconnects fire `ready` again with the same user.
        let _ = self.bot_user.set(ready.user.id);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Skip the channel lookup for our own replies.
        if self.is_own_message(msg.author.id) {
            return;
        }

        let (kind, channel_name) = match self.channel_of(&ctx, &msg).await {
            Ok(Some(channel)) => channel,
            Ok(None) => return,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        let Some(reply) = self.respond(kind, &channel_name, msg.author.id, &msg.content) else {
            return;
        };
        debug!(
            "Replying to {} in channel {}",
            msg.author.name, msg.channel_id
        );

        if let Err(e) = self.send_reply(&ctx, &msg, &reply).await {
            error!("Error sending message: {:?}", e);
        }
    }
}

/// Create the Discord client (without starting it)
pub async fn create_discord_client(
    config: &DiscordBotConfig,
    dispatcher: CommandDispatcher,
) -> Result<Client> {
    let handler = SchedulerBot::new(dispatcher, config.channel_name.clone());

    Client::builder(&config.token, config.intents)
        .event_handler(handler)
        .await
        .map_err(|cause| DiscordError::ClientBuildFailed {
            cause,
            token_preview: DiscordError::token_preview(&config.token),
        })
}

/// Run the bot until the gateway stops or `shutdown` resolves, whichever
/// comes first. Shards are closed cleanly on shutdown.
pub async fn run_discord_bot(
    config: DiscordBotConfig,
    dispatcher: CommandDispatcher,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let mut client = create_discord_client(&config, dispatcher).await?;
    let shard_manager = client.shard_manager.clone();

    info!("Starting Discord bot...");
    tokio::select! {
        result = client.start() => {
            result.map_err(|cause| DiscordError::GatewayFailed { cause })?;
        }
        _ = shutdown => {
            info!("Shutdown requested, closing Discord shards");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scheduler_core::{AvailabilityStore, Weekday};
    use std::sync::Arc;

    const AUTHOR_ID: u64 = 42;

    fn bot() -> SchedulerBot {
        let dispatcher = CommandDispatcher::new(Arc::new(AvailabilityStore::new()));
        SchedulerBot::new(dispatcher, DEFAULT_CHANNEL_NAME)
    }

    fn total_entries(bot: &SchedulerBot) -> usize {
        Weekday::ALL
            .into_iter()
            .map(|day| bot.dispatcher().store().query(day).len())
            .sum()
    }

    #[test]
    fn config_defaults_to_scheduler_channel() {
        let config = DiscordBotConfig::new("token");
        assert_eq!(config.channel_name, "scheduler");
        assert!(config.intents.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(config.intents.contains(GatewayIntents::GUILD_MESSAGES));

        let config = config.with_channel_name("availability");
        assert_eq!(config.channel_name, "availability");
    }

    #[test]
    fn messages_outside_the_scheduler_channel_are_ignored() {
        let bot = bot();
        let author = UserId::new(AUTHOR_ID);
        let add = "!schedule add me Sunday 15:00 18:00";

        assert_eq!(bot.respond(ChannelType::Text, "general", author, add), None);
        assert_eq!(bot.respond(ChannelType::Voice, "scheduler", author, add), None);
        assert_eq!(bot.respond(ChannelType::News, "scheduler", author, add), None);
        assert_eq!(total_entries(&bot), 0);
    }

    #[test]
    fn me_is_stored_as_the_authors_mention() {
        let bot = bot();
        let author = UserId::new(AUTHOR_ID);
        let reply = bot.respond(
            ChannelType::Text,
            "Scheduler",
            author,
            "!schedule add me Sunday 15:00 18:00\n",
        );
        assert_eq!(reply.as_deref(), Some(scheduler_core::command::ADD_SUCCESS));

        let sunday = bot.dispatcher().store().query(Weekday::Sunday);
        assert_eq!(sunday.len(), 1);
        assert_eq!(sunday[0].user_id.as_str(), "<@42>");

        let reply = bot.respond(
            ChannelType::Text,
            "scheduler",
            author,
            "!schedule check me",
        );
        assert_eq!(
            reply.as_deref(),
            Some("Availability for <@42>:\nSunday: 15:00 - 18:00")
        );
    }

    #[test]
    fn own_messages_are_ignored_once_ready() {
        let bot = bot();
        let author = UserId::new(AUTHOR_ID);
        let own = UserId::new(7);
        let help = "!schedule help";

        assert!(bot.respond(ChannelType::Text, "scheduler", own, help).is_some());

        bot.bot_user.set(own).unwrap();
        assert_eq!(bot.respond(ChannelType::Text, "scheduler", own, help), None);
        assert!(bot.respond(ChannelType::Text, "scheduler", author, help).is_some());
    }
}
