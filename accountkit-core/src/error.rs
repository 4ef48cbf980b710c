use thiserror::Error;

/// Error outputs from `AccountKit`
#[derive(Debug, Error)]
pub enum AccountKitError {
    /// The provided secret scalar cannot be padded to the curve's required
    /// width (it is longer than 32 bytes)
    #[error("invalid_secret_length: expected at most {max} bytes, got {actual}")]
    InvalidSecretLength {
        /// Maximum accepted scalar width in bytes
        max: usize,
        /// Length of the scalar that was provided
        actual: usize,
    },
    /// A project-scoped subkey could not be derived
    #[error("derivation_error: {reason}")]
    DerivationError {
        /// Why the derivation was rejected
        reason: String,
    },
    /// A project record is missing a required field and cannot be processed
    #[error("malformed_project_record: missing or empty `{field}`")]
    MalformedProjectRecord {
        /// Name of the missing field
        field: &'static str,
    },
    /// The presented input is not valid for the requested operation
    #[error("invalid_input: {attribute}: {reason}")]
    InvalidInput {
        /// Which input was rejected
        attribute: String,
        /// Why it was rejected
        reason: String,
    },
    /// Unexpected error serializing information
    #[error("serialization_error: {0}")]
    SerializationError(String),
    /// Network connection error with details
    #[error("network_error: {url}: status {status:?}: {error}")]
    NetworkError {
        /// The URL the request was sent to
        url: String,
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Error details
        error: String,
    },
    /// HTTP request failure
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}
