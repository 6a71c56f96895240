//! Turns a homework record into a user-facing message

use serde_json::Value;

use crate::error::FormatError;
use crate::status::HomeworkStatus;

/// The fields of a homework record the bot cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

impl HomeworkRecord {
    /// Extract name and status from a raw record as returned by the API
    pub fn from_value(record: &Value) -> Result<Self, FormatError> {
        let fields = match record.as_object() {
            Some(fields) if !fields.is_empty() => fields,
            _ => return Err(FormatError::EmptyHomework),
        };

        let homework_name = fields
            .get("homework_name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(FormatError::MissingHomeworkName)?;

        let status = match fields.get("status") {
            Some(Value::String(code)) => code.parse()?,
            Some(other) => return Err(FormatError::UnknownStatus(other.to_string())),
            None => return Err(FormatError::UnknownStatus("<missing>".to_string())),
        };

        Ok(Self {
            homework_name: homework_name.to_string(),
            status,
        })
    }

    pub fn message(&self) -> String {
        format!(
            "Changed status of review for \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

/// Render the status-change message for a raw homework record
pub fn format_status(record: &Value) -> Result<String, FormatError> {
    HomeworkRecord::from_value(record).map(|record| record.message())
}
