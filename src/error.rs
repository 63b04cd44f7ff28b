//! Error types for cfddns.

use thiserror::Error;

/// Result type alias for cfddns.
pub type Result<T> = std::result::Result<T, CfddnsError>;

/// A single error object from the Cloudflare API `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiError {
    /// Provider-assigned error code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// cfddns error types.
#[derive(Error, Debug)]
pub enum CfddnsError {
    /// Token could not be read from its file or environment source.
    #[error("Token could not be read: {0}")]
    Token(String),

    /// Network/HTTP transport error.
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not JSON or did not have the expected shape.
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// No active zone matched the requested name.
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// No A record matched the requested name within its zone.
    #[error("DNS record not found: {0}")]
    RecordNotFound(String),

    /// The API answered a lookup with `success: false`.
    #[error("Cloudflare API error: {0}")]
    Api(String),

    /// The API rejected a record update with `success: false`.
    #[error("Update of {record} rejected: {}", format_errors(.errors))]
    UpdateRejected {
        record: String,
        errors: Vec<ApiError>,
    },

    /// IP detection error.
    #[error("IP detection failed: {0}")]
    IpDetection(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CfddnsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CfddnsError::UnexpectedResponse(e.to_string())
        } else {
            CfddnsError::Network(e.to_string())
        }
    }
}

fn format_errors(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "unknown error".to_string();
    }
    errors
        .iter()
        .map(ApiError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
