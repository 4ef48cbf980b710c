//! User-facing account records built from derived keys.

use serde::{Deserialize, Serialize};

use crate::{error::AccountKitError, keypair::derive_keypair, secret::SecretScalar};

/// A derived account, ready for display and signing.
///
/// Accounts are immutable once built. `raw_secret` deliberately exposes the
/// padded scalar the keypair was derived from so that callers can derive
/// further subkeys from project-scoped secrets if ever needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Short label identifying the account, e.g. the login method or the
    /// project name.
    pub label: String,
    /// Base58 encoding of the full 64-byte keypair secret
    /// (`seed || public_key`), importable by Solana tooling.
    pub encoded_secret: String,
    /// The padded 32-byte scalar the keypair was derived from, hex on the
    /// wire.
    #[serde(with = "hex::serde")]
    pub raw_secret: Vec<u8>,
    /// Display name shown to the user, e.g. `"Example (app.example.com)"`.
    pub display_name: String,
    /// Base58-encoded Ed25519 public key.
    pub address: String,
}

impl Account {
    /// Builds an account from a secret scalar and its display metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AccountKitError::InvalidSecretLength`] if the scalar cannot
    /// be mapped to a keypair.
    pub fn build(
        scalar: &SecretScalar,
        label: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, AccountKitError> {
        let keypair = derive_keypair(scalar)?;
        Ok(Self {
            label: label.into(),
            encoded_secret: bs58::encode(keypair.to_keypair_bytes()).into_string(),
            raw_secret: scalar.padded()?.to_vec(),
            display_name: display_name.into(),
            address: bs58::encode(keypair.verifying_key().as_bytes()).into_string(),
        })
    }
}
