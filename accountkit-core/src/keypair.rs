//! Ed25519 keypair derivation from a secret scalar.

use ed25519_dalek::SigningKey;

use crate::{error::AccountKitError, secret::SecretScalar};

/// Derives the deterministic Ed25519 signing key for a secret scalar.
///
/// The scalar is zero-extended on the left to 32 bytes and used directly as
/// the Ed25519 seed, so the same scalar always yields the same keypair. The
/// 64-byte keypair representation (`seed || public_key`) is available via
/// [`SigningKey::to_keypair_bytes`], matching the wire format Solana tooling
/// expects.
///
/// # Errors
///
/// Returns [`AccountKitError::InvalidSecretLength`] if the scalar cannot be
/// padded to the seed width. For well-formed 256-bit inputs this path is
/// unreachable, but it is checked rather than assumed.
pub fn derive_keypair(scalar: &SecretScalar) -> Result<SigningKey, AccountKitError> {
    let seed = scalar.padded()?;
    Ok(SigningKey::from_bytes(&seed))
}
