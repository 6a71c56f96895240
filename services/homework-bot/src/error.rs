//! Error types for the homework bot

/// Ways a decoded API response can have the wrong shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("response is not a mapping")]
    NotAMapping,

    #[error("response is missing key '{0}'")]
    MissingKey(&'static str),

    #[error("homeworks is not a list")]
    HomeworksNotAList,

    #[error("current_date is not an integer")]
    CurrentDateNotInteger,
}

/// Ways a single homework record can fail to format
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("empty homework record")]
    EmptyHomework,

    #[error("homework record is missing homework_name")]
    MissingHomeworkName,

    #[error("unknown homework status '{0}'")]
    UnknownStatus(String),
}

/// Errors that can occur in the homework bot
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API unavailable: {0}")]
    ApiUnavailable(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Invalid API response: {0}")]
    Shape(#[from] ShapeError),

    #[error("Invalid homework record: {0}")]
    Format(#[from] FormatError),

    #[error("Notifier error: {0}")]
    Notifier(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;
