use serde::Serialize;

use super::Role;

/// Body of `POST /api/orgs/{orgId}/users`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment<'a> {
    pub login_or_email: &'a str,
    pub role: Role,
}
