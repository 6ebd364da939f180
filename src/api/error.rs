/// Error types for calls against the Grafana HTTP API
use thiserror::Error;

/// Errors that can occur while talking to Grafana
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrafanaError {
    /// Transport failure: DNS, refused connection, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Lookup endpoint answered with something other than 200 or 404
    #[error("Unexpected status {status} from {operation}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
    },

    #[error("Failed to create organization, status code: {status}")]
    CreateOrg { status: u16 },

    #[error("Failed to create user {login}, status code: {status}")]
    CreateUser { login: String, status: u16 },

    #[error("Failed to assign role to {login}, status code: {status}")]
    AssignRole { login: String, status: u16 },

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GrafanaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GrafanaError::Network(format!("request timed out: {}", e))
        } else {
            GrafanaError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GrafanaError {
    fn from(e: serde_json::Error) -> Self {
        GrafanaError::Decode(e.to_string())
    }
}
