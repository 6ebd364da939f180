use std::fmt;

use super::{Organization, Role};
use crate::api::GrafanaError;

/// Step of the per-user pipeline that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Lookup,
    CreateUser,
    AssignRole,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Lookup => "lookup",
            Stage::CreateUser => "create user",
            Stage::AssignRole => "assign role",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserStatus {
    /// Created and given `role` in the target organization.
    Created { role: Role },
    /// Already present; left untouched.
    Skipped,
    Failed { stage: Stage, error: GrafanaError },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserOutcome {
    pub login: String,
    pub status: UserStatus,
}

impl UserOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, UserStatus::Failed { .. })
    }
}

/// Result of one provisioning run.
#[derive(Clone, Debug)]
pub struct ProvisionReport {
    pub organization: Organization,
    pub org_created: bool,
    pub outcomes: Vec<UserOutcome>,
}

impl ProvisionReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, UserStatus::Created { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == UserStatus::Skipped)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}
