use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{DeliveryError, Notifier};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API adapter using the plain `sendMessage` method.
pub struct TelegramNotifier {
    client: reqwest::Client,
    token: String,
}

impl TelegramNotifier {
    pub fn new(token: String, timeout: std::time::Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, token })
    }

    fn send_message_url(&self) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/sendMessage", self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(DeliveryError::Rejected(format!("status {status}: {preview}")));
        }

        debug!(chat_id, chars = text.len(), "Delivered Telegram message");
        Ok(())
    }
}
