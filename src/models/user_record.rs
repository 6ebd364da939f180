use serde::{Deserialize, Serialize};
use std::fmt;

use super::Role;

/// One desired Grafana account, as listed in the users file.
/// The same shape is posted to `/api/admin/users`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
    pub role: Role,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("login", &self.login)
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
