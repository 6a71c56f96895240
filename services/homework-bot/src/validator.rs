//! Shape validation for decoded API responses

use serde_json::Value;

use crate::error::ShapeError;

/// A response whose top-level shape has been checked.
///
/// Individual records are kept exactly as the server sent them; they are
/// checked later, one at a time, by the formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Check that `raw` is a mapping with a `homeworks` list and an integer
/// `current_date`.
pub fn validate(raw: Value) -> Result<ApiResponse, ShapeError> {
    tracing::info!("Validating API response");

    let Value::Object(mut map) = raw else {
        tracing::error!("API response is not a mapping");
        return Err(ShapeError::NotAMapping);
    };

    for key in ["homeworks", "current_date"] {
        if !map.contains_key(key) {
            tracing::error!("API response is missing key '{}'", key);
            return Err(ShapeError::MissingKey(key));
        }
    }

    let homeworks = match map.remove("homeworks") {
        Some(Value::Array(homeworks)) => homeworks,
        _ => {
            tracing::error!("homeworks in API response is not a list");
            return Err(ShapeError::HomeworksNotAList);
        }
    };

    let Some(current_date) = map.get("current_date").and_then(Value::as_i64) else {
        tracing::error!("current_date in API response is not an integer");
        return Err(ShapeError::CurrentDateNotInteger);
    };

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}
