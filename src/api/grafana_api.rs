use async_trait::async_trait;

use super::client::GrafanaClient;
use super::error::GrafanaError;
use super::{orgs, users};
use crate::models::{OrgId, Organization, Role, UserRecord};

/// The Grafana operations the provisioning pipeline depends on.
#[async_trait]
pub trait GrafanaApi: Send + Sync {
    async fn find_organization(&self, name: &str) -> Result<Option<Organization>, GrafanaError>;

    async fn create_organization(&self, name: &str) -> Result<OrgId, GrafanaError>;

    async fn user_exists(&self, login: &str) -> Result<bool, GrafanaError>;

    async fn create_user(&self, user: &UserRecord) -> Result<(), GrafanaError>;

    async fn assign_role(&self, email: &str, role: Role, org_id: OrgId) -> Result<(), GrafanaError>;
}

#[async_trait]
impl GrafanaApi for GrafanaClient {
    async fn find_organization(&self, name: &str) -> Result<Option<Organization>, GrafanaError> {
        orgs::find_organization(self, name).await
    }

    async fn create_organization(&self, name: &str) -> Result<OrgId, GrafanaError> {
        orgs::create_organization(self, name).await
    }

    async fn user_exists(&self, login: &str) -> Result<bool, GrafanaError> {
        users::user_exists(self, login).await
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), GrafanaError> {
        users::create_user(self, user).await
    }

    async fn assign_role(&self, email: &str, role: Role, org_id: OrgId) -> Result<(), GrafanaError> {
        users::assign_role(self, email, role, org_id).await
    }
}
