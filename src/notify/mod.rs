pub mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Delivery transport error: {0}")]
    Transport(String),

    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// Outbound notification port. Delivery failures are reported to the caller
/// for logging but never roll back state that was already updated; the
/// contract is at-least-attempted-once, not exactly-once.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError>;
}
