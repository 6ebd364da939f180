use reqwest::StatusCode;

use super::client::GrafanaClient;
use super::error::GrafanaError;
use crate::models::{OrgId, Role, RoleAssignment, UserRecord};

/// Whether a user with this login exists; a 404 means "no".
pub async fn user_exists(client: &GrafanaClient, login: &str) -> Result<bool, GrafanaError> {
    let params = [("login", login)];
    let resp = client.get("/api/users/lookup", Some(&params[..])).await?;

    match resp.status {
        StatusCode::OK => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        other => Err(GrafanaError::UnexpectedStatus {
            operation: "user lookup",
            status: other.as_u16(),
        }),
    }
}

/// Create a user through the server admin API.
pub async fn create_user(client: &GrafanaClient, user: &UserRecord) -> Result<(), GrafanaError> {
    let resp = client.post("/api/admin/users", user).await?;

    if resp.status != StatusCode::OK {
        return Err(GrafanaError::CreateUser {
            login: user.login.clone(),
            status: resp.status.as_u16(),
        });
    }
    Ok(())
}

/// Add a user to an organization with the given role.
pub async fn assign_role(
    client: &GrafanaClient,
    login_or_email: &str,
    role: Role,
    org_id: OrgId,
) -> Result<(), GrafanaError> {
    let endpoint = format!("/api/orgs/{}/users", org_id);
    let body = RoleAssignment { login_or_email, role };
    let resp = client.post(&endpoint, &body).await?;

    if resp.status != StatusCode::OK {
        return Err(GrafanaError::AssignRole {
            login: login_or_email.to_string(),
            status: resp.status.as_u16(),
        });
    }
    Ok(())
}
