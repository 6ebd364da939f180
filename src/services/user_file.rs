use std::path::Path;

use crate::config::ConfigError;
use crate::models::UserRecord;

/// Read the desired users from a JSON array on disk.
/// Nothing beyond structural decoding is checked.
pub fn load_users_from_file(path: &Path) -> Result<Vec<UserRecord>, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let users: Vec<UserRecord> = serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(count = users.len(), path = %path.display(), "Loaded users file");
    Ok(users)
}
