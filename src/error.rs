use axum::http::StatusCode;
use serde::Serialize;
use std::fmt;

/// Structured failure produced at the gateway boundary.
///
/// Every remote-call failure is converted into one of these; nothing escapes
/// a gateway operation as a panic or a raw transport error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GatewayError {
    #[serde(rename = "errorKey")]
    pub error_key: String,
    pub message: String,
    /// Raw payload or status line kept for logging; not shown to end users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GatewayError {
    /// Base URL or shared secret absent from the process configuration.
    pub fn config_missing() -> Self {
        Self {
            error_key: "config-missing".to_string(),
            message: "BigBlueButton configuration missing".to_string(),
            detail: None,
        }
    }

    /// Network or timeout failure talking to the conferencing server.
    pub fn transport(err: &reqwest::Error) -> Self {
        Self {
            error_key: "transport-error".to_string(),
            message: "Failed to reach the conferencing server".to_string(),
            detail: Some(err.to_string()),
        }
    }

    /// Failure reported by the conferencing server itself. For parsed XML
    /// failures `error_key` carries the server's own messageKey.
    pub fn remote(error_key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_key: error_key.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// The meeting does not exist but the operation requires it to.
    pub fn not_found() -> Self {
        Self {
            error_key: "not-found".to_string(),
            message: "No meeting found".to_string(),
            detail: None,
        }
    }

    /// Payload could not be interpreted; keeps the raw text for diagnostics.
    pub fn parse(raw_payload: &str) -> Self {
        Self {
            error_key: "parse-error".to_string(),
            message: "Failed to parse XML response".to_string(),
            detail: Some(raw_payload.to_string()),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// HTTP status a handler should answer with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error_key.as_str() {
            "not-found" => StatusCode::BAD_REQUEST,
            "transport-error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_key, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Wire shape for handler failures: the short human-readable message plus
/// the machine key, without the diagnostic detail.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "errorKey")]
    pub error_key: String,
}

impl From<&GatewayError> for ErrorBody {
    fn from(err: &GatewayError) -> Self {
        Self {
            error: err.message.clone(),
            error_key: err.error_key.clone(),
        }
    }
}
