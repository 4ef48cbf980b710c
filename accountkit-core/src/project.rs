//! Project records as returned by the developer dashboard.

use serde::{Deserialize, Serialize};

use crate::error::AccountKitError;

/// A project (dApp) registered against the user's account.
///
/// Field names follow the developer-dashboard wire format. Records arrive in
/// no particular order and may be partially malformed; validation happens
/// per record during reconciliation so that one bad record never poisons the
/// rest of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Opaque project identifier, base64-encoded for transport.
    #[serde(default)]
    pub project_id: String,
    /// Host the project is served from, e.g. `app.example.com`.
    #[serde(default)]
    pub hostname: String,
    /// Human-readable project name.
    #[serde(default)]
    pub name: String,
    /// Timestamp of the user's last login to this project. Only compared
    /// lexicographically, so any sortable timestamp format works.
    #[serde(default)]
    pub last_login: String,
}

impl ProjectRecord {
    /// Checks that the fields required for derivation are present.
    ///
    /// # Errors
    ///
    /// Returns [`AccountKitError::MalformedProjectRecord`] naming the first
    /// missing field.
    pub fn validate(&self) -> Result<(), AccountKitError> {
        if self.project_id.is_empty() {
            return Err(AccountKitError::MalformedProjectRecord {
                field: "project_id",
            });
        }
        if self.hostname.is_empty() {
            return Err(AccountKitError::MalformedProjectRecord {
                field: "hostname",
            });
        }
        if self.last_login.is_empty() {
            return Err(AccountKitError::MalformedProjectRecord {
                field: "last_login",
            });
        }
        Ok(())
    }
}
