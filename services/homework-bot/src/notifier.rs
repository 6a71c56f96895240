//! Notifier trait for delivering messages to the user

use async_trait::async_trait;

/// Trait for sending a text message to a chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send `text` to the chat identified by `chat_id`
    async fn send(&self, chat_id: &str, text: &str) -> crate::Result<()>;
}
