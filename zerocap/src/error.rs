//! Error types of the zerocap crate.

use thiserror::Error;
use zerocap_jwt::JwtError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for capability operations.
pub type CapResult<T> = Result<T, CapError>;

/// Errors from issuing or checking capabilities.
#[derive(Debug, Error)]
pub enum CapError {
    /// The capability is not valid at the given time.
    #[error("capability expired: exp {exp} is not after {at}")]
    Expired {
        /// The expiration of the capability.
        exp: u64,

        /// The time it was checked at.
        at: u64,
    },

    /// The issuer of a link is not the audience its parent delegated to.
    #[error("audience mismatch: parent delegated to {parent_audience}, child issued by {child_issuer}")]
    AudienceMismatch {
        /// The audience of the parent.
        parent_audience: String,

        /// The issuer of the child.
        child_issuer: String,
    },

    /// A link is about a different subject than its parent, or than the capability being issued.
    #[error("subject mismatch: expected {expected}, found {found}")]
    SubjectMismatch {
        /// The subject of the parent.
        expected: String,

        /// The subject of the child.
        found: String,
    },

    /// A link claims more than its parent granted.
    #[error("permission mismatch: permission exceeds parent")]
    PermissionMismatch,

    /// The requested permission is not covered by the presented capability.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The chain does not end at a capability self-issued by the subject.
    #[error("issuer should be subject: issuer {issuer}, subject {subject}")]
    IssuerNotSubject {
        /// The issuer at the end of the chain.
        issuer: String,

        /// The subject the chain is about.
        subject: String,
    },

    /// The chain is longer than allowed.
    #[error("delegation chain exceeds maximum depth: {depth} > {max}")]
    DepthExceeded {
        /// The length of the presented chain.
        depth: usize,

        /// The configured maximum.
        max: usize,
    },

    /// The signer delegating a capability is not the audience of the parent capability.
    #[error("audience mismatch: signer {signer} is not the delegate of the parent capability, which names {audience}")]
    NotParentAudience {
        /// The id of the signer.
        signer: String,

        /// The audience of the parent.
        audience: String,
    },

    /// The capability being issued claims more than the parent capability grants.
    #[error("delegated permission exceeds the parent capability's permission")]
    ExceedsParentPermission,

    /// A capability for another subject was issued without a parent capability.
    #[error("a parent capability is required to delegate on behalf of {0}")]
    MissingParentCapability(String),

    /// The decoded payload does not have the shape of a capability.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Token errors, including invalid signatures.
    #[error("token error: {0}")]
    Token(#[from] JwtError),

    /// Io errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Toml deserialization errors
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration is not usable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
