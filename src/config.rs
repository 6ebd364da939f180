use secrecy::Secret;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::api::AdminCredentials;
use crate::utils::split_credentials;

// Default configuration constants
pub const DEFAULT_GRAFANA_URL: &str = "http://localhost:3000";
pub const DEFAULT_ADMIN_USER: &str = "admin";
pub const DEFAULT_USERS_FILE: &str = "/etc/grafana/users.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Environment variable names
pub const ENV_GRAFANA_URL: &str = "GRAFANA_URL";
pub const ENV_ADMIN_USER: &str = "GRAFANA_ADMIN_USER";
pub const ENV_ADMIN_PASSWORD: &str = "GRAFANA_ADMIN_PASSWORD";
pub const ENV_ORG_NAME: &str = "GRAFANA_ORG_NAME";
pub const ENV_USERS_FILE: &str = "GRAFANA_USERS_FILE";
pub const ENV_TIMEOUT_SECS: &str = "GRAFANA_TIMEOUT_SECS";

// Command-line flags named in errors when they supplied the value
pub const FLAG_URL: &str = "--url";
pub const FLAG_TIMEOUT: &str = "--timeout";

/// Errors raised before any network activity. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading users file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing users JSON {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Values given on the command line; each one wins over its environment variable.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub org: Option<String>,
    pub users_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Everything one provisioning run needs to know.
#[derive(Debug, Clone)]
pub struct Settings {
    pub grafana_url: String,
    pub credentials: AdminCredentials,
    pub org_name: String,
    pub users_file: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_env(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok(), overrides)
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F, overrides: &Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let (raw_url, url_source) = match &overrides.url {
            Some(url) => (url.clone(), FLAG_URL),
            None => (
                get(ENV_GRAFANA_URL).unwrap_or_else(|| DEFAULT_GRAFANA_URL.to_string()),
                ENV_GRAFANA_URL,
            ),
        };
        let split = split_credentials(&raw_url).map_err(|reason| ConfigError::Invalid {
            var: url_source,
            reason,
        })?;
        let (url_user, url_pass) = match split.credentials {
            Some((u, p)) => (Some(u), Some(p).filter(|p| !p.is_empty())),
            None => (None, None),
        };

        let user = get(ENV_ADMIN_USER)
            .or(url_user)
            .unwrap_or_else(|| DEFAULT_ADMIN_USER.to_string());
        let password = get(ENV_ADMIN_PASSWORD)
            .or(url_pass)
            .ok_or(ConfigError::Missing(ENV_ADMIN_PASSWORD))?;

        let org_name = overrides
            .org
            .clone()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .or_else(|| get(ENV_ORG_NAME))
            .ok_or(ConfigError::Missing(ENV_ORG_NAME))?;

        let (timeout_secs, timeout_source) = match overrides.timeout_secs {
            Some(secs) => (secs, FLAG_TIMEOUT),
            None => match get(ENV_TIMEOUT_SECS) {
                Some(raw) => {
                    let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                        var: ENV_TIMEOUT_SECS,
                        reason: format!("'{}': {}", raw, e),
                    })?;
                    (secs, ENV_TIMEOUT_SECS)
                }
                None => (DEFAULT_TIMEOUT_SECS, ENV_TIMEOUT_SECS),
            },
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: timeout_source,
                reason: "timeout must be at least one second".to_string(),
            });
        }

        Ok(Settings {
            grafana_url: split.url,
            credentials: AdminCredentials {
                user,
                password: Secret::new(password),
            },
            org_name,
            users_file: resolve_users_file(&lookup, overrides.users_file.as_deref()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Users file path: CLI flag, then `GRAFANA_USERS_FILE`, then the default.
pub fn resolve_users_file<F>(lookup: F, flag: Option<&Path>) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    lookup(ENV_USERS_FILE)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE))
}
