use reqwest::StatusCode;
use serde::Deserialize;

use super::client::GrafanaClient;
use super::error::GrafanaError;
use crate::models::{OrgId, Organization};

/// Body returned by `POST /api/orgs`. Grafana documents `orgId`;
/// some servers answer with `id`, both land here.
#[derive(Debug, Deserialize)]
struct CreatedOrg {
    #[serde(rename = "orgId", alias = "id")]
    org_id: OrgId,
}

#[derive(serde::Serialize)]
struct NewOrg<'a> {
    name: &'a str,
}

/// Look up an organization by name.
/// A 404 is the normal "absent" answer and maps to `Ok(None)`.
pub async fn find_organization(
    client: &GrafanaClient,
    name: &str,
) -> Result<Option<Organization>, GrafanaError> {
    let endpoint = format!("/api/orgs/name/{}", urlencoding::encode(name));
    let resp = client.get(&endpoint, None).await?;

    match resp.status {
        StatusCode::OK => Ok(Some(resp.json()?)),
        StatusCode::NOT_FOUND => Ok(None),
        other => Err(GrafanaError::UnexpectedStatus {
            operation: "organization lookup",
            status: other.as_u16(),
        }),
    }
}

pub async fn create_organization(client: &GrafanaClient, name: &str) -> Result<OrgId, GrafanaError> {
    let resp = client.post("/api/orgs", &NewOrg { name }).await?;

    if resp.status != StatusCode::OK {
        return Err(GrafanaError::CreateOrg {
            status: resp.status.as_u16(),
        });
    }

    let created: CreatedOrg = resp.json()?;
    Ok(created.org_id)
}
