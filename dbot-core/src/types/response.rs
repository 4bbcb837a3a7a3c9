//! Bot API call result and request fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named request fields of a Bot API call (`chat_id`, `text`, `parse_mode`, ...).
pub type Fields = Map<String, Value>;

/// Result of an outbound Bot API call: the `{ok, result, description, error_code}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

impl Response {
    /// Successful response carrying `result`.
    pub fn ok(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            description: None,
            error_code: None,
        }
    }

    /// Refused call as reported by the Bot API.
    pub fn error(error_code: i64, description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            description: Some(description.into()),
            error_code: Some(error_code),
        }
    }

    /// Sentinel returned when no outbound call was made.
    pub fn empty() -> Self {
        Self::ok(Value::Bool(true))
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_response() {
        let response = Response::empty();
        assert!(response.is_ok());
        assert_eq!(response.result, Some(Value::Bool(true)));
        assert!(response.description.is_none());
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let response: Response = serde_json::from_value(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: message to delete not found"
        }))
        .unwrap();

        assert_eq!(
            response,
            Response::error(400, "Bad Request: message to delete not found")
        );
        assert!(!response.is_ok());
    }
}
