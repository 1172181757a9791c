use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Message used when the backend gives none
pub const FALLBACK_MESSAGE: &str = "API Request Failed";

/// Non-success response from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub message: String,
    /// Field name to validation message
    pub field_errors: HashMap<String, String>,
    pub status: u16,
}

impl ApiFailure {
    /// Build from a parsed error body shaped like
    /// `{"message": "...", "data": {"field": {"code": "...", "message": "..."}}}`.
    /// Missing or malformed parts fall back to defaults.
    pub fn from_body(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();

        let field_errors = body
            .get("data")
            .and_then(Value::as_object)
            .map(|data| {
                data.iter()
                    .filter_map(|(field, detail)| {
                        let msg = match detail {
                            Value::String(s) => Some(s.clone()),
                            other => other.get("message").and_then(Value::as_str).map(str::to_string),
                        };
                        msg.map(|m| (field.clone(), m))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { message, field_errors, status }
    }

    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend answered with a non-2xx status
    #[error("{}", .0.message)]
    Api(ApiFailure),

    /// Request never completed
    #[error("Backend request failed: {0}")]
    Transport(String),

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected backend response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            ClientError::Api(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.api_failure().map(|f| f.status)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
