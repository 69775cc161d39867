//! Telegram alert delivery.
//!
//! This crate provides:
//! - HTML alert message formatting
//! - Bounded-concurrency fanout to subscribed chats
//! - Telegram bot integration, including the subscribe/unsubscribe commands

pub mod dispatcher;
pub mod message;
pub mod telegram;

pub use dispatcher::{AlertError, AlertTransport, Dispatcher};
pub use message::format_alert;
pub use telegram::TelegramBot;
