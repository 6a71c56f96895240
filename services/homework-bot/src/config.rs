//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Homework review API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_retry_time")]
    pub retry_time_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            retry_time_seconds: default_retry_time(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl PracticumConfig {
    pub fn retry_time(&self) -> Duration {
        Duration::from_secs(self.retry_time_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
            token: None,
            chat_id: None,
        }
    }
}

/// The three identifiers the bot cannot start without
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Fill unset secrets from `.env` and the process environment
    pub fn resolve_secrets(&mut self) {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill unset secrets using `lookup`; values already in the config win
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fill_secret(&mut self.practicum.token, PRACTICUM_TOKEN_VAR, &lookup);
        fill_secret(&mut self.telegram.token, TELEGRAM_TOKEN_VAR, &lookup);
        fill_secret(&mut self.telegram.chat_id, TELEGRAM_CHAT_ID_VAR, &lookup);
    }

    /// Reject settings the poll loop cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.practicum.retry_time_seconds == 0 {
            return Err(crate::HomeworkBotError::Config(
                "practicum.retry_time_seconds must be greater than zero".to_string(),
            ));
        }
        if self.practicum.request_timeout_seconds == 0 {
            return Err(crate::HomeworkBotError::Config(
                "practicum.request_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Check that every required identifier is present
    pub fn credentials(&self) -> crate::Result<Credentials> {
        let required = [
            (PRACTICUM_TOKEN_VAR, &self.practicum.token),
            (TELEGRAM_TOKEN_VAR, &self.telegram.token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram.chat_id),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| !is_present(value))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(crate::HomeworkBotError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Credentials {
            practicum_token: self.practicum.token.clone().unwrap_or_default(),
            telegram_token: self.telegram.token.clone().unwrap_or_default(),
            telegram_chat_id: self.telegram.chat_id.clone().unwrap_or_default(),
        })
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn fill_secret<F>(slot: &mut Option<String>, var: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if is_present(slot) {
        return;
    }
    if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("Resolved {} from environment", var);
        *slot = Some(value);
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_retry_time() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::HomeworkBotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
