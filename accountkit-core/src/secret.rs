//! Secret scalar handling.
//!
//! The authentication layer hands keys around as hex strings of variable
//! length; internally everything operates on a fixed-width scalar. The
//! zero-extension to full width is a user-observable contract: the same
//! short secret must always produce the same account.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::AccountKitError;

/// Width in bytes of an Ed25519 secret scalar.
pub const SCALAR_WIDTH: usize = 32;

/// A secret scalar: the master secret from the login flow, a derivation
/// root, or a project-scoped subkey.
///
/// # Security
///
/// - The bytes are zeroized on drop.
/// - The scalar is never logged or serialized in plaintext; `Debug` is
///   redacted.
/// - Callers own any longer-lived storage and are responsible for scrubbing
///   their copies after use.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretScalar(Vec<u8>);

impl SecretScalar {
    /// Creates a scalar from raw bytes. The bytes may be shorter than
    /// [`SCALAR_WIDTH`]; they are zero-extended on the left when the scalar
    /// is used for key derivation.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Creates a scalar from a hex string as produced by the login layer.
    ///
    /// Strings shorter than the full scalar width are left-padded with `'0'`
    /// before decoding, matching the transport convention for secrets whose
    /// leading bytes are zero.
    ///
    /// # Errors
    ///
    /// Returns [`AccountKitError::InvalidInput`] if the string is not valid
    /// hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, AccountKitError> {
        // String-level pad so odd-length hex decodes; `padded()` applies the
        // same left zero-extension at the byte level for scalars built from
        // raw bytes.
        let padded = if hex_str.len() < SCALAR_WIDTH * 2 {
            format!("{hex_str:0>width$}", width = SCALAR_WIDTH * 2)
        } else {
            hex_str.to_string()
        };
        let bytes =
            hex::decode(&padded).map_err(|e| AccountKitError::InvalidInput {
                attribute: "secret_scalar".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes as provided, without padding.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the scalar zero-extended on the left to [`SCALAR_WIDTH`]
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AccountKitError::InvalidSecretLength`] if the scalar is
    /// longer than [`SCALAR_WIDTH`] bytes and cannot be padded.
    pub fn padded(&self) -> Result<[u8; SCALAR_WIDTH], AccountKitError> {
        if self.0.len() > SCALAR_WIDTH {
            return Err(AccountKitError::InvalidSecretLength {
                max: SCALAR_WIDTH,
                actual: self.0.len(),
            });
        }
        let mut out = [0u8; SCALAR_WIDTH];
        out[SCALAR_WIDTH - self.0.len()..].copy_from_slice(&self.0);
        Ok(out)
    }
}

impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretScalar")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl From<[u8; SCALAR_WIDTH]> for SecretScalar {
    fn from(bytes: [u8; SCALAR_WIDTH]) -> Self {
        Self(bytes.to_vec())
    }
}
