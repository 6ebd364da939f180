use crate::api::{GrafanaApi, GrafanaError};
use crate::models::{OrgId, ProvisionReport, Stage, UserOutcome, UserRecord, UserStatus};

use super::org_service::resolve_organization;

/// Ensure one user exists and, if it had to be created, holds its role
/// in `org_id`. Existing users are left untouched.
pub async fn provision_user<A: GrafanaApi + ?Sized>(
    api: &A,
    user: &UserRecord,
    org_id: OrgId,
) -> UserOutcome {
    let failed = |stage: Stage, error: GrafanaError| {
        tracing::error!(login = %user.login, %stage, %error, "Failed to provision user");
        UserOutcome {
            login: user.login.clone(),
            status: UserStatus::Failed { stage, error },
        }
    };

    match api.user_exists(&user.login).await {
        Ok(true) => {
            tracing::info!(login = %user.login, "User already exists, skipped");
            return UserOutcome {
                login: user.login.clone(),
                status: UserStatus::Skipped,
            };
        }
        Ok(false) => {}
        Err(e) => return failed(Stage::Lookup, e),
    }

    if let Err(e) = api.create_user(user).await {
        return failed(Stage::CreateUser, e);
    }
    tracing::info!(login = %user.login, "User created");

    if let Err(e) = api.assign_role(&user.email, user.role.clone(), org_id).await {
        return failed(Stage::AssignRole, e);
    }
    tracing::info!(login = %user.login, role = %user.role, org_id = %org_id, "Role assigned");

    UserOutcome {
        login: user.login.clone(),
        status: UserStatus::Created { role: user.role.clone() },
    }
}

/// Full run: resolve the organization first, then every user in input
/// order. Only organization resolution can fail the whole run.
pub async fn provision<A: GrafanaApi + ?Sized>(
    api: &A,
    org_name: &str,
    users: &[UserRecord],
) -> Result<ProvisionReport, GrafanaError> {
    let resolved = resolve_organization(api, org_name).await?;
    let org_id = resolved.organization.id;

    let mut outcomes = Vec::with_capacity(users.len());
    for user in users {
        outcomes.push(provision_user(api, user, org_id).await);
    }

    Ok(ProvisionReport {
        organization: resolved.organization,
        org_created: resolved.created,
        outcomes,
    })
}
