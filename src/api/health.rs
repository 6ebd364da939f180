use reqwest::StatusCode;
use serde::Deserialize;

use super::client::GrafanaClient;
use super::error::GrafanaError;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthInfo {
    pub database: String,
    #[serde(default)]
    pub version: String,
}

impl HealthInfo {
    pub fn is_ok(&self) -> bool {
        self.database == "ok"
    }
}

pub async fn health(client: &GrafanaClient) -> Result<HealthInfo, GrafanaError> {
    let resp = client.get("/api/health", None).await?;
    if resp.status != StatusCode::OK {
        return Err(GrafanaError::UnexpectedStatus {
            operation: "health check",
            status: resp.status.as_u16(),
        });
    }
    resp.json()
}
