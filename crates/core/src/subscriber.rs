//! Subscriber identity.

use serde::{Deserialize, Serialize};

/// A chat registered to receive alerts.
///
/// Created and removed by the command bot; the scan pipeline only reads
/// the subscriber set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscriber {
    /// Telegram chat id.
    pub chat_id: i64,
}

impl Subscriber {
    pub fn new(chat_id: i64) -> Self {
        Self { chat_id }
    }
}
