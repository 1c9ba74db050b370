//! Error types of the zerocap-key crate.

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A type alias for a `Result` that uses `KeyError` as the error type.
pub type KeyResult<T> = Result<T, KeyError>;

/// The main error type of the zerocap-key crate.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Signing, verification or key construction failed.
    #[error("Signature error: {0}")]
    SignatureError(#[from] signature::Error),

    /// The JWS algorithm name is not one we support.
    #[error("Unsupported JWS algorithm name: {0}")]
    UnsupportedJwsAlgName(String),

    /// The string is not a valid `did:wk` identifier.
    #[error("Invalid did:wk identifier: {0}")]
    InvalidDid(String),

    /// The multicodec prefix does not name a supported key type.
    #[error("Unsupported multicodec key prefix: {0:02x?}")]
    UnsupportedKeyCodec(Vec<u8>),

    /// Base encoding or decoding error.
    #[error("Base encoding or decoding error: {0}")]
    BaseError(#[from] multibase::Error),
}
