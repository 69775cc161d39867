//! Bounded-concurrency alert fanout.

use crate::message::format_alert;
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{info, warn};
use trendwatch_core::{AlertableToken, Subscriber};

/// Ceiling on simultaneously in-flight subscriber deliveries.
pub const MAX_CONCURRENT_DELIVERIES: usize = 20;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
    #[error("Database error: {0}")]
    Store(#[from] trendwatch_store::StoreError),
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Outbound message delivery, one call per message.
///
/// Implemented by the Telegram bot in production and by recording stubs
/// in tests.
#[async_trait]
pub trait AlertTransport: Send + Sync {
    async fn deliver(&self, chat_id: i64, text: &str) -> Result<(), AlertError>;
}

/// Fans alert messages out to every subscriber.
///
/// One delivery task per subscriber, admitted through a counting semaphore;
/// tasks past the cap wait for a permit rather than failing. Within a task
/// messages go out sequentially so each chat reads alerts in order.
pub struct Dispatcher {
    max_in_flight: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            max_in_flight: MAX_CONCURRENT_DELIVERIES,
        }
    }

    /// Override the concurrency cap. Used by tests.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Deliver every alert to every subscriber.
    ///
    /// A failed delivery aborts that subscriber's remaining messages only;
    /// other subscribers are unaffected. With no alerts or no subscribers
    /// this is a no-op and the transport is never called.
    pub async fn dispatch<T>(
        &self,
        transport: &T,
        alerts: &[AlertableToken],
        subscribers: &[Subscriber],
    ) where
        T: AlertTransport + ?Sized,
    {
        if alerts.is_empty() || subscribers.is_empty() {
            return;
        }

        let messages: Vec<String> = alerts.iter().map(format_alert).collect();
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));

        let deliveries = subscribers.iter().map(|subscriber| {
            let semaphore = Arc::clone(&semaphore);
            let messages = &messages;
            let chat_id = subscriber.chat_id;
            async move {
                // The semaphore is never closed, so acquisition only waits.
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };

                for text in messages {
                    if let Err(err) = transport.deliver(chat_id, text).await {
                        warn!(
                            "Delivery to chat {} failed, skipping its remaining alerts: {}",
                            chat_id, err
                        );
                        return;
                    }
                }
                info!("Alerted chat {} with {} token(s)", chat_id, messages.len());
            }
        });

        join_all(deliveries).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use trendwatch_core::{AlertKind, TokenSnapshot};

    struct StubTransport {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        delivered: Mutex<Vec<(i64, String)>>,
        failing_chat: Option<i64>,
    }

    impl StubTransport {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                delivered: Mutex::new(Vec::new()),
                failing_chat: None,
            }
        }

        fn failing_for(chat_id: i64) -> Self {
            Self {
                failing_chat: Some(chat_id),
                ..Self::new()
            }
        }

        fn delivered(&self) -> Vec<(i64, String)> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AlertTransport for StubTransport {
        async fn deliver(&self, chat_id: i64, text: &str) -> Result<(), AlertError> {
            if self.failing_chat == Some(chat_id) {
                return Err(AlertError::Delivery("stub transport failure".to_string()));
            }

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.delivered
                .lock()
                .unwrap()
                .push((chat_id, text.to_string()));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn alerts(count: usize) -> Vec<AlertableToken> {
        (0..count)
            .map(|i| AlertableToken {
                snapshot: TokenSnapshot::new(
                    &format!("TOK{}", i),
                    &format!("addr-{}", i),
                    1.0 + i as f64,
                    100_000.0,
                ),
                kind: AlertKind::NewListing,
            })
            .collect()
    }

    fn subscribers(count: usize) -> Vec<Subscriber> {
        (0..count as i64).map(Subscriber::new).collect()
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_the_cap() {
        let transport = StubTransport::new();
        Dispatcher::new()
            .dispatch(&transport, &alerts(1), &subscribers(25))
            .await;

        assert_eq!(transport.delivered().len(), 25);
        assert!(transport.max_in_flight.load(Ordering::SeqCst) <= MAX_CONCURRENT_DELIVERIES);
    }

    #[tokio::test]
    async fn small_cap_is_respected_under_load() {
        let transport = StubTransport::new();
        Dispatcher::new()
            .with_max_in_flight(3)
            .dispatch(&transport, &alerts(2), &subscribers(10))
            .await;

        assert_eq!(transport.delivered().len(), 20);
        assert!(transport.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn one_failing_subscriber_does_not_block_the_rest() {
        let transport = StubTransport::failing_for(1);
        Dispatcher::new()
            .dispatch(&transport, &alerts(2), &subscribers(3))
            .await;

        let delivered = transport.delivered();
        assert!(delivered.iter().all(|(chat_id, _)| *chat_id != 1));
        for chat_id in [0, 2] {
            let count = delivered.iter().filter(|(c, _)| *c == chat_id).count();
            assert_eq!(count, 2);
        }
    }

    #[tokio::test]
    async fn messages_within_a_chat_keep_alert_order() {
        let transport = StubTransport::new();
        let alerts = alerts(3);
        let expected: Vec<String> = alerts.iter().map(format_alert).collect();

        Dispatcher::new()
            .dispatch(&transport, &alerts, &subscribers(1))
            .await;

        let texts: Vec<String> = transport
            .delivered()
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        assert_eq!(texts, expected);
    }

    #[tokio::test]
    async fn empty_alerts_or_subscribers_is_a_no_op() {
        let transport = StubTransport::new();
        let dispatcher = Dispatcher::new();

        dispatcher.dispatch(&transport, &[], &subscribers(5)).await;
        dispatcher.dispatch(&transport, &alerts(5), &[]).await;

        assert!(transport.delivered().is_empty());
    }
}
