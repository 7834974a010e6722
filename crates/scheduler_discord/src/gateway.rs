//! Platform-independent pieces of the gateway: which channels the bot
//! listens in, how user references are normalized, and how replies are cut
//! to fit Discord's message limit.

use regex::Regex;
use serenity::model::channel::ChannelType;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Discord rejects messages longer than this.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Matches `<@123>` and the nickname form `<@!123>`.
static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?(\d+)>$").expect("mention pattern is a valid regex"));

/// Position of the `<user>` argument in `<prefix> <command> <user> ...`.
const USER_TOKEN: usize = 2;

/// Sub-commands whose third token names a user.
const USER_COMMANDS: [&str; 3] = ["add", "update", "check"];

/// Whether a channel is one the bot should read commands from.
pub fn is_scheduler_channel(kind: ChannelType, name: &str, wanted: &str) -> bool {
    kind == ChannelType::Text && name.eq_ignore_ascii_case(wanted)
}

/// Rewrite the user argument of a command so every way of naming a person
/// ends up as the same id: `me` becomes the author's mention and nickname
/// mentions lose their `!`. Only `add`, `update` and `check` take a user;
/// anything else is returned untouched.
pub fn resolve_user_alias<'a>(content: &'a str, prefix: &str, author_id: u64) -> Cow<'a, str> {
    let tokens: Vec<&str> = content.trim_end().split(' ').collect();
    if tokens[0] != prefix || tokens.len() <= USER_TOKEN {
        return Cow::Borrowed(content);
    }
    if !USER_COMMANDS
        .iter()
        .any(|command| command.eq_ignore_ascii_case(tokens[1]))
    {
        return Cow::Borrowed(content);
    }

    let user = tokens[USER_TOKEN];
    let resolved = if user.eq_ignore_ascii_case("me") {
        format!("<@{author_id}>")
    } else if let Some(caps) = USER_MENTION.captures(user) {
        format!("<@{}>", &caps[1])
    } else {
        return Cow::Borrowed(content);
    };

    if resolved == user {
        return Cow::Borrowed(content);
    }
    let rewritten: Vec<&str> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| if i == USER_TOKEN { resolved.as_str() } else { *token })
        .collect();
    Cow::Owned(rewritten.join(" "))
}

/// Split a message into chunks that fit Discord's message length limit
pub fn split_message(content: &str, max_length: usize) -> Vec<String> {
    if content.chars().count() <= max_length {
        return vec![content.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in content.lines() {
        let line_len = line.chars().count();
        if current_len + line_len + 1 > max_length {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            // If a single line is too long, split it
            if line_len > max_length {
                for chunk in line.chars().collect::<Vec<_>>().chunks(max_length) {
                    chunks.push(chunk.iter().collect());
                }
            } else {
                current = line.to_string();
                current_len = line_len;
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
                current_len += 1;
            }
            current.push_str(line);
            current_len += line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
