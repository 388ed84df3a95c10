//! Response envelope handling
//!
//! Every API response is wrapped as `{"status": "...", "data": {...}}`.
//! A response is successful only when the HTTP code is 200 *and* the status
//! is `"ok"`; anything else becomes a typed [`ClientError`].

use crate::{ClientError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status value of a successful response
pub const STATUS_OK: &str = "ok";

/// The `{status, data}` wrapper
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope {
    /// "ok" or an "error-*" code
    #[serde(default)]
    pub status: String,
    /// Payload, `null` when absent
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Parse a raw response body
    pub fn parse(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Consume the envelope, returning the payload or the mapped error
    pub fn into_data(self, code: u16) -> Result<Value> {
        if self.status != STATUS_OK || code != 200 {
            return Err(ClientError::from_status(self.status, code));
        }
        Ok(self.data)
    }
}

/// Unwrap a response body received with HTTP `code`
pub fn unwrap(code: u16, body: &[u8]) -> Result<Value> {
    match Envelope::parse(body) {
        Ok(envelope) => envelope.into_data(code),
        // A non-JSON error page still surfaces as an API error
        Err(_) if code != 200 => Err(ClientError::Api {
            status: String::new(),
            code,
        }),
        Err(e) => Err(e),
    }
}

/// Decode an unwrapped payload into a typed value
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_returns_data_unchanged() {
        let body = json!({"status": "ok", "data": {"id": "abc", "nested": {"n": 1}}});
        let data = unwrap(200, body.to_string().as_bytes()).unwrap();
        assert_eq!(data, json!({"id": "abc", "nested": {"n": 1}}));
    }

    #[test]
    fn test_not_found_at_200() {
        let body = json!({"status": "error-notFound", "data": {}});
        let err = unwrap(200, body.to_string().as_bytes()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_ok_status_with_bad_http_code() {
        let body = json!({"status": "ok", "data": {}});
        let err = unwrap(500, body.to_string().as_bytes()).unwrap_err();
        match err {
            ClientError::Api { status, code } => {
                assert_eq!(status, "ok");
                assert_eq!(code, 500);
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_error_page() {
        let err = unwrap(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Api { code: 502, .. }));
    }

    #[test]
    fn test_non_json_success_is_decode_error() {
        let err = unwrap(200, b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[test]
    fn test_missing_status() {
        let err = unwrap(200, br#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, ClientError::Api { .. }));
    }
}
