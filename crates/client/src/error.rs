//! REST client errors and backend error-detail parsing.

use serde_json::Value;

use yanstore_core::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    /// Non-success status; `detail` is the human-readable message from the body.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("decode error: {0}")]
    Decode(String),
    /// Rejected locally before anything was sent.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Turn an error response body into a single display message.
///
/// Handles the backend's validation shapes: `detail` as a string, as a list of
/// `{msg}` objects, or as an arbitrary object. A falsy `detail` (`""`, `null`,
/// `false`, `0`) counts as absent and the whole body is shown instead.
pub fn error_detail(status: u16, body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return if body.is_empty() {
            format!("Error {status}")
        } else {
            body.to_string()
        };
    };

    match json.get("detail").filter(|detail| !is_falsy(detail)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Object(obj) => match obj.get("msg") {
                    Some(Value::String(msg)) if !msg.is_empty() => msg.clone(),
                    _ => item.to_string(),
                },
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(obj @ Value::Object(_)) => obj.to_string(),
        Some(_) => format!("Error {status}: Validation failed"),
        None => format!("Error {status}: {json}"),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
