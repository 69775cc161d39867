//! Telegram bot handlers.

use crate::dispatcher::{AlertError, AlertTransport};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use tracing::error;
use trendwatch_store::Database;

const INTERNAL_ERROR_REPLY: &str =
    "Could not process your request due to an internal server error.";

/// Bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Subscribe to trending token alerts")]
    Subscribe,
    #[command(description = "Stop receiving alerts")]
    Unsubscribe,
    #[command(description = "Show help")]
    Help,
}

/// Telegram bot wrapper.
pub struct TelegramBot {
    bot: Bot,
    db: Database,
}

impl TelegramBot {
    /// Create a new bot with the given token.
    pub fn new(token: &str, db: Database) -> Self {
        let bot = Bot::new(token);
        Self { bot, db }
    }

    /// Send an alert message to a chat.
    pub async fn send_alert(&self, chat_id: i64, message: &str) -> Result<(), AlertError> {
        self.bot
            .send_message(ChatId(chat_id), message)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }

    /// Run the bot command handler until interrupted.
    pub async fn run(self: Arc<Self>) {
        let bot = self.bot.clone();
        let handler = Update::filter_message().filter_command::<Command>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let this = Arc::clone(&self);
                async move { this.handle_command(bot, msg, cmd).await }
            },
        );

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    async fn handle_command(
        &self,
        bot: Bot,
        msg: Message,
        cmd: Command,
    ) -> Result<(), teloxide::RequestError> {
        let chat_id = msg.chat.id.0;

        match cmd {
            Command::Start => {
                let text = "Hello there! Welcome to Trendwatch! With me, you can stay \
                            updated with the latest trends in the Solana blockchain!\n\n\
                            Check my menu for the list of supported commands.";
                bot.send_message(msg.chat.id, text).await?;
            }

            Command::Subscribe => {
                let reply = match self.db.add_subscriber(chat_id).await {
                    Ok(true) => "You have successfully subscribed to trending token alerts.",
                    Ok(false) => "You are already subscribed.",
                    Err(err) => {
                        error!("Failed to subscribe chat {}: {}", chat_id, err);
                        INTERNAL_ERROR_REPLY
                    }
                };
                bot.send_message(msg.chat.id, reply).await?;
            }

            Command::Unsubscribe => {
                let reply = match self.db.remove_subscriber(chat_id).await {
                    Ok(true) => {
                        "You have successfully unsubscribed from trending token alerts. \
                         You will no longer receive price alerts for trending tokens."
                    }
                    Ok(false) => "You are not subscribed in the first place.",
                    Err(err) => {
                        error!("Failed to unsubscribe chat {}: {}", chat_id, err);
                        INTERNAL_ERROR_REPLY
                    }
                };
                bot.send_message(msg.chat.id, reply).await?;
            }

            Command::Help => {
                bot.send_message(msg.chat.id, Command::descriptions().to_string())
                    .await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl AlertTransport for TelegramBot {
    async fn deliver(&self, chat_id: i64, text: &str) -> Result<(), AlertError> {
        self.send_alert(chat_id, text).await
    }
}
