//! Error types of the zerocap-jwt crate.

use thiserror::Error;
use zerocap_key::JwsAlgorithm;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for token operations.
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors from signing, decoding or verifying tokens.
#[derive(Debug, Error)]
pub enum JwtError {
    /// The compact serialization is not `header.payload.signature`.
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Json (de)serialization errors
    #[error("Json serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Base64 decoding errors
    #[error("Base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Unsupported token type
    #[error("Unsupported token type: {0}")]
    UnsupportedTokenType(String),

    /// No verifier is registered for the algorithm named in the header.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(JwsAlgorithm),

    /// The header algorithm does not match the key that signs or verifies.
    #[error("Algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch {
        /// The algorithm of the key.
        expected: JwsAlgorithm,

        /// The algorithm named in the header.
        found: JwsAlgorithm,
    },

    /// The payload carries no string `iss` claim to verify against.
    #[error("Missing issuer: payload has no string `iss` claim")]
    MissingIssuer,

    /// The `iss` claim is not an identifier a public key can be recovered from.
    #[error("Invalid issuer {0}: {1}")]
    InvalidIssuer(String, zerocap_key::KeyError),

    /// The signature does not verify against the issuer's key.
    #[error("Signature invalid: {0}")]
    SignatureInvalid(String),

    /// Key errors
    #[error("Key error: {0}")]
    KeyError(#[from] zerocap_key::KeyError),
}
