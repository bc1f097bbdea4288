use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::Result;

pub const STATUS_OK: u16 = 200;

/// The proxy-style result handed back to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    /// Serialized JSON, not a nested object.
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            body: body.into(),
        }
    }
}

/// Renders `{"message": <message>}` as compact JSON text.
pub fn message_body(message: &str) -> Result<String> {
    Ok(serde_json::to_string(&json!({ "message": message }))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_body_is_compact() {
        let body = message_body("Hello from a in b").unwrap();
        assert_eq!(body, r#"{"message":"Hello from a in b"}"#);
    }

    #[test]
    fn test_message_body_escapes() {
        let body = message_body(r#"say "hi""#).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["message"], r#"say "hi""#);
    }

    #[test]
    fn test_response_wire_shape() {
        let response = Response::ok(r#"{"message":"x"}"#);
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"statusCode":200,"body":"{\"message\":\"x\"}"}"#
        );
    }
}
