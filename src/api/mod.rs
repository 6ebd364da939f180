// Grafana HTTP API modules
pub mod client;
pub mod error;
pub mod orgs;
pub mod users;
pub mod health;
pub mod grafana_api;

// Re-export commonly used items
pub use client::{set_silent, AdminCredentials, ApiResponse, GrafanaClient};
pub use error::GrafanaError;
pub use grafana_api::GrafanaApi;
pub use health::{health, HealthInfo};
