//! Project-scoped subkey derivation.
//!
//! Each registered project gets its own secret scalar, derived from the
//! user's derivation root and the project's opaque identifier. The
//! construction is HKDF-SHA256 with a fixed domain separation label:
//!
//! ```text
//! subkey = HKDF-SHA256(
//!     salt = "accountkit:project-subkey",
//!     ikm  = derivation_root,
//!     info = "accountkit:project-subkey" || tag,
//!     len  = 32
//! )
//! ```
//!
//! Distinct tags yield statistically independent scalars, and no number of
//! `(tag, subkey)` pairs reveals the derivation root. The derivation is
//! bit-exact: any implementation of this scheme must produce the same
//! subkey for the same `(root, tag)` pair.

use base64::{engine::general_purpose::STANDARD, Engine};
use hkdf::Hkdf;
use sha2::Sha256;

use crate::{
    error::AccountKitError,
    secret::{SecretScalar, SCALAR_WIDTH},
};

/// Domain separation label for project subkey derivation.
const LABEL_PROJECT_SUBKEY: &[u8] = b"accountkit:project-subkey";

/// Derives the project-scoped secret scalar for a derivation tag.
///
/// # Errors
///
/// Returns [`AccountKitError::DerivationError`] if the tag is empty.
pub fn derive_subkey(
    root: &SecretScalar,
    tag: &[u8],
) -> Result<SecretScalar, AccountKitError> {
    if tag.is_empty() {
        return Err(AccountKitError::DerivationError {
            reason: "derivation tag is empty".to_string(),
        });
    }

    let mut info = Vec::with_capacity(LABEL_PROJECT_SUBKEY.len() + tag.len());
    info.extend_from_slice(LABEL_PROJECT_SUBKEY);
    info.extend_from_slice(tag);

    let hkdf = Hkdf::<Sha256>::new(Some(LABEL_PROJECT_SUBKEY), root.as_bytes());
    let mut okm = [0u8; SCALAR_WIDTH];
    hkdf.expand(&info, &mut okm)
        .map_err(|e| AccountKitError::DerivationError {
            reason: e.to_string(),
        })?;

    Ok(SecretScalar::from(okm))
}

/// Decodes a project identifier from its base64 transport encoding into the
/// raw derivation tag.
///
/// # Errors
///
/// Returns [`AccountKitError::DerivationError`] if the identifier is empty
/// or not valid base64.
pub fn decode_project_tag(project_id: &str) -> Result<Vec<u8>, AccountKitError> {
    if project_id.is_empty() {
        return Err(AccountKitError::DerivationError {
            reason: "project id is empty".to_string(),
        });
    }
    STANDARD
        .decode(project_id)
        .map_err(|e| AccountKitError::DerivationError {
            reason: format!("project id is not valid base64: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> SecretScalar {
        SecretScalar::new(vec![0xAB; 32])
    }

    #[test]
    fn test_same_inputs_same_subkey() {
        let a = derive_subkey(&root(), b"project-1").unwrap();
        let b = derive_subkey(&root(), b"project-1").unwrap();
        assert_eq!(a.padded().unwrap(), b.padded().unwrap());
    }

    #[test]
    fn test_different_tags_different_subkeys() {
        let a = derive_subkey(&root(), b"project-1").unwrap();
        let b = derive_subkey(&root(), b"project-2").unwrap();
        assert_ne!(a.padded().unwrap(), b.padded().unwrap());
    }

    #[test]
    fn test_different_roots_different_subkeys() {
        let other = SecretScalar::new(vec![0xCD; 32]);
        let a = derive_subkey(&root(), b"project-1").unwrap();
        let b = derive_subkey(&other, b"project-1").unwrap();
        assert_ne!(a.padded().unwrap(), b.padded().unwrap());
    }

    #[test]
    fn test_subkey_never_reproduces_root() {
        let subkey = derive_subkey(&root(), b"project-1").unwrap();
        assert_ne!(subkey.padded().unwrap(), root().padded().unwrap());
    }

    #[test]
    fn test_single_byte_flip_changes_every_tag_position() {
        // A naive independence check: flipping one byte of the tag must
        // change the subkey regardless of which byte is flipped.
        let base = derive_subkey(&root(), b"projectX").unwrap();
        for i in 0..8 {
            let mut tag = *b"projectX";
            tag[i] ^= 0x01;
            let flipped = derive_subkey(&root(), &tag).unwrap();
            assert_ne!(
                base.padded().unwrap(),
                flipped.padded().unwrap(),
                "flip at byte {i} produced an identical subkey"
            );
        }
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        assert!(matches!(
            derive_subkey(&root(), b""),
            Err(AccountKitError::DerivationError { .. })
        ));
    }

    #[test]
    fn test_decode_project_tag() {
        assert_eq!(decode_project_tag("aGVsbG8=").unwrap(), b"hello");
        assert!(decode_project_tag("").is_err());
        assert!(decode_project_tag("!!not-base64!!").is_err());
    }
}
