use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds inside a Grafana organization.
/// The known basic roles use Grafana's spelling; any other string is
/// carried through untouched and left for Grafana to accept or reject.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full control over the organization.
    Admin,
    /// Create and modify dashboards and alerts.
    Editor,
    /// Read-only access.
    Viewer,
    /// Member without a basic role.
    None,
    /// Anything else found in the users file.
    Other(String),
}

impl Role {
    /// Name as sent to the Grafana API.
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
            Role::None => "None",
            Role::Other(s) => s,
        }
    }

    /// Whether this is one of Grafana's basic roles.
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Admin" => Role::Admin,
            "Editor" => Role::Editor,
            "Viewer" => Role::Viewer,
            "None" => Role::None,
            _ => Role::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
