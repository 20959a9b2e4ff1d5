//! Error types for Exa API operations

use thiserror::Error;

/// Errors that can occur while talking to the Exa API
#[derive(Debug, Error)]
pub enum ExaError {
    /// The HTTP client could not be built
    #[error("build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The base URL or an endpoint URL is malformed
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The credential source failed to supply a key
    #[error("credential unavailable: {0}")]
    Credential(String),

    /// Network or HTTP transport error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON encoding or decoding error
    #[error("decode response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Exa operations
pub type Result<T> = std::result::Result<T, ExaError>;

impl ExaError {
    /// Build an API error from a status code and raw response body
    ///
    /// Uses the body's `error` (or `message`) field when it is JSON, and the
    /// trimmed body text otherwise.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "empty response body".to_string()
                } else {
                    trimmed.to_string()
                }
            });

        Self::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_json_body() {
        let err = ExaError::from_response(401, r#"{"error": "Invalid API key"}"#);
        assert_eq!(err.to_string(), "HTTP 401: Invalid API key");
    }

    #[test]
    fn test_api_error_from_plain_body() {
        let err = ExaError::from_response(502, "  Bad Gateway \n");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = ExaError::from_response(500, "");
        assert_eq!(err.to_string(), "HTTP 500: empty response body");
    }

    #[test]
    fn test_api_error_message_field() {
        let err = ExaError::from_response(400, r#"{"message": "query too long"}"#);
        assert!(matches!(err, ExaError::Api { status: 400, ref message } if message == "query too long"));
    }
}
