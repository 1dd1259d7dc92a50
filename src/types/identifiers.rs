use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// The key a bullet is grouped under (the owning company).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Group used for bullets whose company is absent or null.
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(key: impl Into<String>) -> Self {
        GroupKey(key.into())
    }

    pub fn unknown() -> Self {
        GroupKey(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(key: &str) -> Self {
        GroupKey::new(key)
    }
}

/// Content-derived bullet identifier.
///
/// `b_` followed by the first 12 hex characters of the SHA-256 of the
/// bullet's serialized JSON object. Identical payloads get identical IDs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulletId(String);

impl BulletId {
    const PREFIX: &'static str = "b_";
    const HEX_LEN: usize = 12;

    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        // A Map<String, Value> always serializes.
        let bytes = serde_json::to_vec(fields).unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(&bytes);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        BulletId(format!("{}{}", Self::PREFIX, &hex[..Self::HEX_LEN]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BulletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
