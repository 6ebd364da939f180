use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a Grafana organization. Always strictly positive, so
/// holding one means resolution has succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrgId(u64);

impl OrgId {
    pub fn new(raw: i64) -> Option<Self> {
        if raw > 0 {
            Some(OrgId(raw as u64))
        } else {
            None
        }
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for OrgId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        OrgId::new(raw).ok_or_else(|| {
            serde::de::Error::custom(format!("organization id must be positive, got {}", raw))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
}
