//! Response types for the remote metadata fetchers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Latest release descriptor as returned by the GitHub API
///
/// Passed through unmodified; fields are not interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseInfo(Map<String, Value>);

impl ReleaseInfo {
    /// Look up a top-level field (e.g. `tag_name`, `assets`)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the raw JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the raw JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ReleaseInfo {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// `GET /api/v1/account/me` response (partial)
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AccountMeResponse {
    response: Option<AccountEnvelope>,
}

#[derive(Debug, Default, Deserialize)]
struct AccountEnvelope {
    account: Option<Account>,
}

#[derive(Debug, Default, Deserialize)]
struct Account {
    username: Option<String>,
}

impl AccountMeResponse {
    /// Username, if present and non-empty
    pub(crate) fn into_username(self) -> Option<String> {
        self.response?
            .account?
            .username
            .filter(|name| !name.is_empty())
    }
}
