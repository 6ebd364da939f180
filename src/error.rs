/// Top-level error types for a provisioning run
use thiserror::Error;

use crate::api::GrafanaError;
use crate::config::ConfigError;

/// Every user was created or skipped
pub const EXIT_OK: i32 = 0;
/// At least one user could not be provisioned
pub const EXIT_PARTIAL_FAILURE: i32 = 1;
/// Nothing was provisioned: bad configuration or unresolved organization
pub const EXIT_FATAL: i32 = 2;
/// `check-config`: Grafana answered unhealthy or could not be reached
pub const EXIT_UNHEALTHY: i32 = 1;

/// Errors that stop a run before any user is processed
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to resolve organization '{org}': {source}")]
    OrgResolution {
        org: String,
        #[source]
        source: GrafanaError,
    },

    #[error("Failed to create HTTP client: {0}")]
    Client(GrafanaError),
}

impl ProvisionError {
    pub fn exit_code(&self) -> i32 {
        EXIT_FATAL
    }
}
