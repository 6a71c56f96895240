//! Poll loop: fetches, validates, formats and notifies on a fixed timer

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api_client::ApiClient;
use crate::formatter::format_status;
use crate::notifier::Notifier;
use crate::validator::validate;

/// State carried from one cycle to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    /// Start of the window requested from the API, in seconds since epoch
    pub last_timestamp: i64,
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The latest homework status was sent to the user
    Notified(String),
    /// The API reported no homework changes in the window
    NoUpdates,
    /// The cycle failed; the diagnostic was sent to the user
    Failed(String),
}

/// Drives the fetch → validate → format → notify cycle
#[derive(Debug)]
pub struct PollLoop {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    chat_id: String,
    retry_time: Duration,
    state: PollState,
}

impl PollLoop {
    pub fn new(
        api: ApiClient,
        notifier: Arc<dyn Notifier>,
        chat_id: impl Into<String>,
        retry_time: Duration,
        start_timestamp: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            chat_id: chat_id.into(),
            retry_time,
            state: PollState {
                last_timestamp: start_timestamp,
            },
        }
    }

    pub fn last_timestamp(&self) -> i64 {
        self.state.last_timestamp
    }

    /// Run cycles until `cancel` fires. Cancellation is only observed while
    /// sleeping between cycles.
    pub async fn run(&mut self, cancel: CancellationToken) {
        tracing::info!(
            "Polling {} every {:?} via {}",
            self.api.endpoint(),
            self.retry_time,
            self.notifier.type_name()
        );

        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(
                "Cycle finished: {:?} (last_timestamp={})",
                outcome,
                self.state.last_timestamp
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_time) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one cycle. Errors never escape: they are reported to the user
    /// and leave the window where it was.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.check_for_update().await {
            Ok((update, current_date)) => {
                let outcome = match update {
                    Some(message) => {
                        self.deliver(&message).await;
                        CycleOutcome::Notified(message)
                    }
                    None => {
                        tracing::debug!("No new homework status");
                        CycleOutcome::NoUpdates
                    }
                };
                self.state.last_timestamp = current_date;
                outcome
            }
            Err(e) => {
                let message = format!("Program failure: {}", e);
                tracing::error!("{}", message);
                self.deliver(&message).await;
                CycleOutcome::Failed(message)
            }
        }
    }

    async fn check_for_update(&self) -> crate::Result<(Option<String>, i64)> {
        let raw = self.api.fetch(self.state.last_timestamp).await?;
        let response = validate(raw)?;
        let update = response
            .homeworks
            .first()
            .map(format_status)
            .transpose()?;
        Ok((update, response.current_date))
    }

    async fn deliver(&self, text: &str) {
        match self.notifier.send(&self.chat_id, text).await {
            Ok(()) => tracing::info!("Message sent via {}", self.notifier.type_name()),
            Err(e) => tracing::error!(
                "Failed to send message via {}: {}",
                self.notifier.type_name(),
                e
            ),
        }
    }
}
