//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Envelope returned by every Bot API method
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram notification sender
pub struct TelegramNotifier {
    send_message_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier").finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, token: &str, http: Arc<dyn HttpClient>) -> Self {
        let api_url = config.api_url.trim_end_matches('/');

        tracing::debug!("Created TelegramNotifier for {}", api_url);

        Self {
            send_message_url: format!("{}/bot{}/sendMessage", api_url, token),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, chat_id: &str, text: &str) -> crate::Result<()> {
        let params = [("chat_id", chat_id), ("text", text)];

        tracing::debug!("Sending Telegram message to chat {}", chat_id);

        let response = self.http.post_form(&self.send_message_url, &params).await?;
        let parsed = serde_json::from_str::<TelegramResponse>(&response.body).ok();

        if response.status != 200 || !parsed.as_ref().is_some_and(|r| r.ok) {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or(response.body);
            return Err(crate::HomeworkBotError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, description
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
