//! Long-polling receive loop on top of teloxide.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatAction, ParseMode, UpdateKind};

use crate::bot::commands::{parse_command, CommandDispatcher, Request};
use crate::bot::retry::{with_backoff, RetryPolicy};
use crate::bot::BotError;

/// Receive loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Long-poll timeout passed to `getUpdates`, in seconds.
    pub poll_timeout_secs: u32,
    /// Backoff for failed `getUpdates` calls.
    pub retry: RetryPolicy,
}

/// Polls Telegram for updates and answers commands until a receive error
/// outlives the retry policy.
///
/// Each message is handled on its own task. The backoff starts over after
/// every successful receive.
pub async fn run_polling(
    bot: Bot,
    dispatcher: Arc<CommandDispatcher>,
    settings: PollSettings,
) -> Result<(), BotError> {
    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "bot started, waiting for commands"),
        Err(err) => tracing::warn!(error = %err, "could not fetch bot identity"),
    }

    let poll_timeout = settings.poll_timeout_secs;
    let mut offset: i32 = 0;
    loop {
        let request_offset = offset;
        let updates = with_backoff(&settings.retry, || {
            let bot = bot.clone();
            async move {
                bot.get_updates()
                    .offset(request_offset)
                    .timeout(poll_timeout)
                    .await
            }
        })
        .await
        .map_err(|err| BotError::Telegram(err.to_string()))?;

        for update in updates {
            offset = offset.max(update.id + 1);
            if let UpdateKind::Message(message) = update.kind {
                let bot = bot.clone();
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    handle_message(bot, dispatcher, message).await;
                });
            }
        }
    }
}

async fn handle_message(bot: Bot, dispatcher: Arc<CommandDispatcher>, message: Message) {
    let Some(text) = message.text() else {
        return;
    };
    let Some((cmd, args)) = parse_command(text) else {
        return;
    };
    let user = message.from().map(|u| u.id.0).unwrap_or_default();
    let request = Request::new(cmd, &args);

    if request.needs_network() {
        if let Err(err) = bot.send_chat_action(message.chat.id, ChatAction::Typing).await {
            tracing::debug!(error = %err, "typing indicator failed");
        }
    }

    let html = dispatcher.answer(user, request).await;

    let sent = bot
        .send_message(message.chat.id, html)
        .parse_mode(ParseMode::Html)
        .reply_to_message_id(message.id)
        .disable_web_page_preview(true)
        .await;
    if let Err(err) = sent {
        tracing::warn!(chat = message.chat.id.0, error = %err, "failed to send reply");
    }
}
