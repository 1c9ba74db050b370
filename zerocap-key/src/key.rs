use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Ed25519PubKey, GetKeyType, JwsAlgName, JwsAlgorithm, KeyResult, P256PubKey, PublicKeyBytes,
    PublicKeyGenerate, Verify,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A key pair with a public and private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymmetricKey<P, S> {
    pub(crate) public: P,
    pub(crate) private: S,
}

/// A public key.
pub type PubKey<P> = AsymmetricKey<P, ()>;

/// Supported key types.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// An `ed25519` key
    #[serde(rename = "ed25519")]
    Ed25519,

    /// A `NIST P-256` key
    #[serde(rename = "p256")]
    P256,
}

/// A public key of any supported type.
///
/// This is what a signer identifier resolves to, so verification does not need to know the key type
/// ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrappedPubKey {
    /// `ed25519` public key.
    Ed25519(Ed25519PubKey),

    /// `NIST P-256` public key.
    P256(P256PubKey),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<P, S> AsymmetricKey<P, S> {
    /// Returns the public half of the key.
    pub fn public_key(&self) -> PubKey<P>
    where
        P: Clone,
    {
        AsymmetricKey {
            public: self.public.clone(),
            private: (),
        }
    }
}

impl KeyType {
    /// Returns the JWS algorithm that keys of this type sign with.
    pub fn alg(&self) -> JwsAlgorithm {
        match self {
            KeyType::Ed25519 => JwsAlgorithm::EdDSA,
            KeyType::P256 => JwsAlgorithm::ES256,
        }
    }
}

impl WrappedPubKey {
    /// Reconstructs a public key of the given type from its bytes.
    pub fn from_bytes(key_type: KeyType, bytes: &[u8]) -> KeyResult<Self> {
        match key_type {
            KeyType::Ed25519 => Ed25519PubKey::from_public_key(bytes).map(Self::Ed25519),
            KeyType::P256 => P256PubKey::from_public_key(bytes).map(Self::P256),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Ed25519 => write!(f, "ed25519"),
            KeyType::P256 => write!(f, "p256"),
        }
    }
}

impl Verify for WrappedPubKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        match self {
            WrappedPubKey::Ed25519(key) => key.verify(data, signature),
            WrappedPubKey::P256(key) => key.verify(data, signature),
        }
    }
}

impl PublicKeyBytes for WrappedPubKey {
    fn public_key_bytes(&self) -> Vec<u8> {
        match self {
            WrappedPubKey::Ed25519(key) => key.public_key_bytes(),
            WrappedPubKey::P256(key) => key.public_key_bytes(),
        }
    }
}

impl GetKeyType for WrappedPubKey {
    fn key_type(&self) -> KeyType {
        match self {
            WrappedPubKey::Ed25519(_) => KeyType::Ed25519,
            WrappedPubKey::P256(_) => KeyType::P256,
        }
    }
}

impl JwsAlgName for WrappedPubKey {
    fn alg(&self) -> JwsAlgorithm {
        self.key_type().alg()
    }
}

impl From<Ed25519PubKey> for WrappedPubKey {
    fn from(pub_key: Ed25519PubKey) -> Self {
        WrappedPubKey::Ed25519(pub_key)
    }
}

impl From<P256PubKey> for WrappedPubKey {
    fn from(pub_key: P256PubKey) -> Self {
        WrappedPubKey::P256(pub_key)
    }
}
