//! Homework bot - review status notifier
//!
//! Polls the homework review API, detects status changes of the latest
//! submission, and relays them to a Telegram chat.

pub mod api_client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod io;
pub mod notifier;
pub mod poll_loop;
pub mod status;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config, Credentials};
pub use error::{FormatError, HomeworkBotError, Result, ShapeError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api_client::{current_epoch_secs, ApiClient};
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::poll_loop::PollLoop;
use crate::telegram::TelegramNotifier;

/// Run the bot with the given configuration.
///
/// Fails before polling starts if any required credential is missing or
/// the interval or timeout is zero; otherwise returns only after Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;
    let credentials = config.credentials()?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
        config.practicum.request_timeout(),
    )?);

    let api = ApiClient::new(
        &config.practicum,
        &credentials.practicum_token,
        Arc::clone(&http),
    );
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram,
        &credentials.telegram_token,
        http,
    ));

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let mut poll_loop = PollLoop::new(
        api,
        notifier,
        credentials.telegram_chat_id,
        config.practicum.retry_time(),
        current_epoch_secs(),
    );

    tracing::info!("Homework bot started");
    poll_loop.run(cancel).await;
    tracing::info!("Homework bot stopped");

    Ok(())
}
