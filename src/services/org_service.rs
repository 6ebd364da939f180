use crate::api::{GrafanaApi, GrafanaError};
use crate::models::Organization;

/// Organization the run will assign roles in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrg {
    pub organization: Organization,
    pub created: bool,
}

/// Find the named organization, creating it once if it is absent.
/// No locking: a concurrent creator is only stopped by Grafana's own
/// uniqueness check, and a conflict is reported, not retried.
pub async fn resolve_organization<A: GrafanaApi + ?Sized>(
    api: &A,
    name: &str,
) -> Result<ResolvedOrg, GrafanaError> {
    if let Some(organization) = api.find_organization(name).await? {
        tracing::info!(org = %organization.name, id = %organization.id, "Organization exists");
        return Ok(ResolvedOrg {
            organization,
            created: false,
        });
    }

    let id = api.create_organization(name).await?;
    tracing::info!(org = %name, id = %id, "Organization created");
    Ok(ResolvedOrg {
        organization: Organization {
            id,
            name: name.to_string(),
        },
        created: true,
    })
}
