use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DiscordError {
    #[error("Discord client could not be created")]
    #[diagnostic(
        code(scheduler::discord::client_build_failed),
        help("Check that your Discord bot token is valid and has not been regenerated")
    )]
    ClientBuildFailed {
        #[source]
        cause: serenity::Error,
        token_preview: String,
    },

    #[error("Gateway connection failed")]
    #[diagnostic(
        code(scheduler::discord::gateway_failed),
        help("Enable the Message Content intent in the Discord Developer Portal and check connectivity")
    )]
    GatewayFailed {
        #[source]
        cause: serenity::Error,
    },

    #[error("Channel lookup failed")]
    #[diagnostic(
        code(scheduler::discord::channel_lookup_failed),
        help("Channel {channel_id} not found or bot doesn't have access")
    )]
    ChannelLookupFailed {
        channel_id: String,
        #[source]
        cause: serenity::Error,
    },

    #[error("Message send failed")]
    #[diagnostic(
        code(scheduler::discord::message_send_failed),
        help("Failed to send message to {destination}")
    )]
    MessageSendFailed {
        destination: String,
        message_length: usize,
        #[source]
        cause: serenity::Error,
    },
}

impl DiscordError {
    /// First and last few characters of a token, for logs.
    pub fn token_preview(token: &str) -> String {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

pub type Result<T> = std::result::Result<T, DiscordError>;
