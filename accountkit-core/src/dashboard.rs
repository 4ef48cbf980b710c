//! Thin client for the developer dashboard.
//!
//! Reconciliation itself is pure; this module owns the one network call the
//! surrounding flow needs, fetching the user's registered projects. Its
//! output is handed to [`crate::reconcile`] as a plain list.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use backon::{ExponentialBuilder, Retryable};
use ed25519_dalek::Signer;
use serde::Deserialize;
use strum::EnumString;

use crate::{
    error::AccountKitError, keypair::derive_keypair, project::ProjectRecord,
    secret::SecretScalar,
};

/// The deployment the client talks to. Generally an app will use a single
/// environment for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// Staging dashboard, for development builds.
    Staging,
    /// Production dashboard.
    Production,
}

impl Environment {
    /// Base URL of the developer dashboard for this environment.
    #[must_use]
    pub const fn dashboard_base_url(&self) -> &'static str {
        match self {
            Self::Staging => "https://dashboard.staging.accountkit.dev",
            Self::Production => "https://dashboard.accountkit.dev",
        }
    }
}

/// Envelope returned by the user-projects endpoint.
#[derive(Debug, Deserialize)]
struct UserProjectsResponse {
    #[serde(default)]
    user_projects: Vec<ProjectRecord>,
}

/// A simple wrapper on an HTTP client for talking to the developer
/// dashboard. Sets sensible defaults such as timeouts, user-agent &
/// ensuring HTTPS, and retries transient failures.
pub struct DashboardClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl DashboardClient {
    /// Initializes a client for the given environment.
    #[must_use]
    pub fn new(environment: &Environment) -> Self {
        Self::with_base_url(environment.dashboard_base_url().to_string())
    }

    /// Initializes a client against an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::new();
        let timeout = Duration::from_secs(5);
        let max_retries = 3; // total attempts = 4
        Self {
            client,
            base_url,
            timeout,
            max_retries,
        }
    }

    /// Fetches the user's registered projects, authenticated with the
    /// session's auth key. Missing `user_projects` in the response is
    /// treated as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AccountKitError::NetworkError`] after retries are
    /// exhausted, or an auth-key derivation error.
    pub async fn user_projects(
        &self,
        auth_key: &SecretScalar,
    ) -> Result<Vec<ProjectRecord>, AccountKitError> {
        let url =
            format!("{}/projects/user-projects?chain_namespace=solana", self.base_url);
        #[cfg(not(test))]
        assert!(url.starts_with("https"));

        let headers = auth_headers(auth_key)?;

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_delay(Duration::from_secs(2))
            .with_max_times(self.max_retries as usize);

        let response = (|| async {
            let mut request = self
                .client
                .get(&url)
                .timeout(self.timeout)
                .header(
                    "User-Agent",
                    format!("accountkit-core/{}", env!("CARGO_PKG_VERSION")),
                );
            for (name, value) in &headers {
                request = request.header(*name, value.as_str());
            }
            let response = request.send().await?;
            response.error_for_status()
        })
        .retry(backoff)
        .when(|err: &reqwest::Error| {
            err.is_timeout()
                || err.is_connect()
                || err.status().is_some_and(|s| s.is_server_error())
        })
        .await
        .map_err(|err| AccountKitError::NetworkError {
            url: url.clone(),
            status: err.status().map(|s| s.as_u16()),
            error: err.to_string(),
        })?;

        let envelope: UserProjectsResponse = response.json().await?;
        Ok(envelope.user_projects)
    }
}

/// Builds the authentication headers for a dashboard request: the current
/// unix timestamp signed with the session's auth key, plus the public key
/// the dashboard verifies against.
fn auth_headers(
    auth_key: &SecretScalar,
) -> Result<[(&'static str, String); 3], AccountKitError> {
    let keypair = derive_keypair(auth_key)?;
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AccountKitError::SerializationError(e.to_string()))?
        .as_secs()
        .to_string();
    let signature = keypair.sign(timestamp.as_bytes());
    Ok([
        ("x-auth-pubkey", hex::encode(keypair.verifying_key().as_bytes())),
        ("x-auth-signature", hex::encode(signature.to_bytes())),
        ("x-auth-timestamp", timestamp),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_environment_from_str() {
        assert_eq!(Environment::from_str("staging").unwrap(), Environment::Staging);
        assert_eq!(
            Environment::from_str("production").unwrap(),
            Environment::Production
        );
        assert!(Environment::from_str("local").is_err());
    }

    #[test]
    fn test_auth_headers_are_verifiable() {
        use ed25519_dalek::{Signature, Verifier, VerifyingKey};

        let auth_key = SecretScalar::new(vec![0x55; 32]);
        let headers = auth_headers(&auth_key).unwrap();

        let pubkey_bytes: [u8; 32] = hex::decode(&headers[0].1)
            .unwrap()
            .try_into()
            .unwrap();
        let pubkey = VerifyingKey::from_bytes(&pubkey_bytes).unwrap();
        let signature_bytes: [u8; 64] = hex::decode(&headers[1].1)
            .unwrap()
            .try_into()
            .unwrap();
        let signature = Signature::from_bytes(&signature_bytes);
        assert!(pubkey.verify(headers[2].1.as_bytes(), &signature).is_ok());
    }

    #[tokio::test]
    async fn test_user_projects_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/user-projects?chain_namespace=solana")
            .match_header("x-auth-pubkey", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"user_projects": [{"project_id": "cHJvag==", "hostname": "a.example", "name": "A", "last_login": "2024-01-01"}]}"#,
            )
            .create_async()
            .await;

        let client = DashboardClient::with_base_url(server.url());
        let auth_key = SecretScalar::new(vec![0x55; 32]);
        let projects = client.user_projects(&auth_key).await.unwrap();

        mock.assert_async().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].hostname, "a.example");
    }

    #[tokio::test]
    async fn test_missing_user_projects_field_is_empty_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/projects/user-projects?chain_namespace=solana")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let client = DashboardClient::with_base_url(server.url());
        let auth_key = SecretScalar::new(vec![0x55; 32]);
        let projects = client.user_projects(&auth_key).await.unwrap();
        assert!(projects.is_empty());
    }
}
