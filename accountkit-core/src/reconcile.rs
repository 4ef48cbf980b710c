//! Reconciliation of derived keys against the user's project list.
//!
//! This is the sole entry point of the crate: a pure function over the
//! session secrets and the already-fetched project records. It builds the
//! main wallet account, derives one account per project, and reports which
//! account matches the caller's active application host.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    account::Account,
    error::AccountKitError,
    project::ProjectRecord,
    secret::SecretScalar,
    subkey::{decode_project_tag, derive_subkey},
};

/// Display metadata for the user's primary login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryLogin {
    /// The login method, lowercase as reported by the auth layer,
    /// e.g. `"google"`.
    pub login_type: String,
    /// What identifies the user to themselves: an email address or a name.
    pub display_hint: String,
}

/// The secrets established by the external login flow for one session.
#[derive(Debug, Clone)]
pub struct SessionSecrets {
    /// The master secret the main account is derived from.
    pub master: SecretScalar,
    /// The derivation root for project-scoped subkeys. Some login methods
    /// provide only a primary secret; `None` is a supported state, not an
    /// error, and yields a main-account-only result.
    pub derivation_root: Option<SecretScalar>,
}

/// The outcome of one reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Index 0 is always the main account; indices 1.. are project-derived
    /// accounts, most recently used project first.
    pub accounts: Vec<Account>,
    /// Maps each project-derived address to its display name. Main account
    /// excluded; skipped projects never appear.
    pub address_to_label: HashMap<String, String>,
    /// 1-based index into `accounts` of the account whose hostname matches
    /// the current context, or 0 when nothing matches.
    pub matched_index: usize,
}

/// Derives the full account family for a session and matches it against the
/// caller's current application context.
///
/// Projects are processed in descending `last_login` order (ties keep their
/// input order), so the most recently used project appears first among the
/// derived accounts. A malformed or underivable project record is skipped
/// with a warning; it never aborts reconciliation for the remaining
/// projects. `matched_index` takes the first match in processed order, which
/// by the sort is the most recently used project on a duplicated hostname.
///
/// `current_origin` is the origin URL of the active application; an
/// unparsable origin matches nothing.
///
/// # Errors
///
/// Fails only when the main account itself cannot be derived
/// ([`AccountKitError::InvalidSecretLength`]) — without a main identity
/// there is no result to return.
pub fn reconcile(
    secrets: &SessionSecrets,
    primary: &PrimaryLogin,
    current_origin: &str,
    projects: &[ProjectRecord],
) -> Result<ReconciliationResult, AccountKitError> {
    let main_label = format!(
        "{} {}",
        title_case(&primary.login_type),
        primary.display_hint
    );
    let main = Account::build(
        &secrets.master,
        main_label,
        format!("Wallet {current_origin}"),
    )?;

    let mut accounts = vec![main];
    let mut address_to_label = HashMap::new();
    let mut matched_index = 0;

    let Some(root) = &secrets.derivation_root else {
        return Ok(ReconciliationResult {
            accounts,
            address_to_label,
            matched_index,
        });
    };

    let current_host = host_of(current_origin);

    let mut sorted: Vec<&ProjectRecord> = projects.iter().collect();
    sorted.sort_by(|a, b| b.last_login.cmp(&a.last_login));

    for project in sorted {
        let account = match derive_project_account(root, project) {
            Ok(account) => account,
            Err(error) => {
                tracing::warn!(
                    hostname = %project.hostname,
                    %error,
                    "skipping project during reconciliation"
                );
                continue;
            }
        };

        address_to_label
            .insert(account.address.clone(), account.display_name.clone());
        accounts.push(account);

        // 1-based position in the appended list; first match wins.
        if matched_index == 0
            && !current_host.is_empty()
            && project.hostname == current_host
        {
            matched_index = accounts.len() - 1;
        }
    }

    Ok(ReconciliationResult {
        accounts,
        address_to_label,
        matched_index,
    })
}

/// Derives the account for a single project record.
fn derive_project_account(
    root: &SecretScalar,
    project: &ProjectRecord,
) -> Result<Account, AccountKitError> {
    project.validate()?;
    let tag = decode_project_tag(&project.project_id)?;
    let subkey = derive_subkey(root, &tag)?;
    Account::build(
        &subkey,
        project.name.clone(),
        format!("{} ({})", project.name, project.hostname),
    )
}

/// Uppercases the first character of a login type for display.
fn title_case(login_type: &str) -> String {
    let mut chars = login_type.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Extracts the host from an origin URL; unparsable origins yield the empty
/// string, which matches no project.
fn host_of(origin: &str) -> String {
    Url::parse(origin)
        .ok()
        .and_then(|url| url.host_str().map(ToString::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("google", "Google"; "lowercase login")]
    #[test_case("Apple", "Apple"; "already title case")]
    #[test_case("", ""; "empty login")]
    fn test_title_case(input: &str, expected: &str) {
        assert_eq!(title_case(input), expected);
    }

    #[test_case("https://app.example.com/path", "app.example.com"; "https origin")]
    #[test_case("https://app.example.com:8443", "app.example.com"; "origin with port")]
    #[test_case("not a url", ""; "unparsable origin")]
    #[test_case("", ""; "empty origin")]
    fn test_host_of(origin: &str, expected: &str) {
        assert_eq!(host_of(origin), expected);
    }
}
