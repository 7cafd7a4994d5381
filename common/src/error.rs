use std::fmt;

use serde::{Deserialize, Serialize};

/// Raised before any request is built when a required parameter is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgument {
    parameter: &'static str,
}

impl InvalidArgument {
    #[must_use]
    pub const fn new(parameter: &'static str) -> Self {
        Self { parameter }
    }

    #[must_use]
    pub const fn parameter(&self) -> &'static str {
        self.parameter
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Empty or invalid \"{}\" parameter.", self.parameter)
    }
}

impl std::error::Error for InvalidArgument {}

/// Error payload returned by the Management API on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub status_code: u16,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ApiError {
    /// Builds a payload for responses whose body is not an API error document.
    #[must_use]
    pub fn from_raw(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            error: String::new(),
            message: body.trim().to_string(),
            error_code: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = InvalidArgument::new("audience");
        assert_eq!(err.to_string(), "Empty or invalid \"audience\" parameter.");
        assert_eq!(err.parameter(), "audience");
    }

    #[test]
    fn test_api_error_deserialize() {
        let json = r#"{
            "statusCode": 404,
            "error": "Not Found",
            "message": "The client grant does not exist",
            "errorCode": "inexistent_client_grant"
        }"#;
        let err: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.status_code, 404);
        assert_eq!(err.error, "Not Found");
        assert_eq!(err.error_code.as_deref(), Some("inexistent_client_grant"));
        assert_eq!(err.to_string(), "The client grant does not exist");
    }

    #[test]
    fn test_api_error_without_error_code() {
        let json = r#"{"statusCode":401,"error":"Unauthorized","message":"Invalid token"}"#;
        let err: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.error_code, None);
        let back = serde_json::to_value(&err).unwrap();
        assert!(back.get("errorCode").is_none());
    }

    #[test]
    fn test_api_error_from_raw() {
        let err = ApiError::from_raw(502, "  Bad Gateway\n");
        assert_eq!(err.status_code, 502);
        assert_eq!(err.message, "Bad Gateway");
        assert!(err.error.is_empty());
    }
}
