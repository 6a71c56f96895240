//! Client for the homework review API

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::config::PracticumConfig;
use crate::io::HttpClient;
use crate::HomeworkBotError;

/// Issues authenticated, timestamped requests to the review endpoint
pub struct ApiClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &PracticumConfig, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created ApiClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework updates since `since` (seconds since epoch).
    ///
    /// A zero timestamp is replaced with the current time. Returns the
    /// decoded JSON body of a 200 response.
    pub async fn fetch(&self, since: i64) -> crate::Result<Value> {
        let timestamp = if since == 0 {
            current_epoch_secs()
        } else {
            since
        };
        let from_date = timestamp.to_string();
        let query = [("from_date", from_date.as_str())];

        tracing::debug!("Requesting {} with from_date={}", self.endpoint, from_date);

        let response = match self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &query,
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    "Request to {} with from_date={} failed: {}",
                    self.endpoint,
                    from_date,
                    e
                );
                return Err(HomeworkBotError::ApiUnavailable(format!(
                    "request to {} failed: {}",
                    self.endpoint, e
                )));
            }
        };

        if response.status != 200 {
            tracing::error!(
                "API returned status {} for {} with from_date={}",
                response.status,
                self.endpoint,
                from_date
            );
            return Err(HomeworkBotError::ApiUnavailable(format!(
                "{} returned status {}",
                self.endpoint, response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!("Response from {} is not valid JSON: {}", self.endpoint, e);
            HomeworkBotError::MalformedResponse(e.to_string())
        })
    }
}

/// Current wall-clock time in whole seconds since the Unix epoch
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
