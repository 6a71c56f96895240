//! BDD test world for the homework bot

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cucumber::World;
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::poll_loop::{CycleOutcome, PollLoop};
use homework_bot::{FormatError, HomeworkBotError};

/// A canned reply for the next GET request
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Status(u16, String),
    Unreachable,
}

/// HTTP client that plays back scripted replies and records `from_date`
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    replies: Mutex<VecDeque<ScriptedReply>>,
    from_dates: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn push(&self, reply: ScriptedReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn from_dates(&self) -> Vec<String> {
        self.from_dates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        if let Some((_, from_date)) = query.iter().find(|(k, _)| *k == "from_date") {
            self.from_dates.lock().unwrap().push(from_date.to_string());
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(ScriptedReply::Status(status, body)) => Ok(HttpResponse { status, body }),
            Some(ScriptedReply::Unreachable) | None => Err(HomeworkBotError::Http(
                "connection refused".to_string(),
            )),
        }
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        Err(HomeworkBotError::Http(
            "POST is not scripted in this suite".to_string(),
        ))
    }
}

/// Notifier that records every message it is asked to send
#[derive(Debug)]
pub struct RecordingNotifier {
    fail: bool,
    sent: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn send(&self, _chat_id: &str, text: &str) -> homework_bot::Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(HomeworkBotError::Notifier("chat unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default, World)]
pub struct HomeworkBotWorld {
    // Poll cycle testing
    pub http: Arc<ScriptedHttpClient>,
    pub notifier_fails: bool,
    pub start_timestamp: i64,
    pub notifier: Option<Arc<RecordingNotifier>>,
    pub poll_loop: Option<PollLoop>,
    pub outcomes: Vec<CycleOutcome>,

    // Formatter testing
    pub record: Option<serde_json::Value>,
    pub formatted: Option<Result<String, FormatError>>,
}
