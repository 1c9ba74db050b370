use async_trait::async_trait;
use zerocap_key::{Did, GetKeyType, JwsAlgName, JwsAlgorithm, PublicKeyBytes, Sign};

use crate::JwtResult;

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Something that can sign tokens on behalf of an identity.
///
/// Signing may be asynchronous (a remote or hardware-backed key), so `sign` is async.
#[async_trait]
pub trait JwtSigner: Send + Sync {
    /// The stable identifier of the signer, derived from its public key.
    fn id(&self) -> &str;

    /// The algorithm the signer produces signatures with.
    fn alg(&self) -> JwsAlgorithm;

    /// Signs the given bytes.
    async fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>>;
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [`JwtSigner`] backed by a local key pair.
#[derive(Debug, Clone)]
pub struct KeySigner<K> {
    key: K,
    id: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<K> KeySigner<K>
where
    K: PublicKeyBytes + GetKeyType,
{
    /// Wraps a key pair, deriving its `did:wk` identifier.
    pub fn new(key: K) -> Self {
        let id = Did::from_key(&key).to_string();
        Self { key, id }
    }

    /// Returns the wrapped key pair.
    pub fn key(&self) -> &K {
        &self.key
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

#[async_trait]
impl<K> JwtSigner for KeySigner<K>
where
    K: Sign + JwsAlgName + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn alg(&self) -> JwsAlgorithm {
        self.key.alg()
    }

    async fn sign(&self, data: &[u8]) -> JwtResult<Vec<u8>> {
        Ok(self.key.sign(data)?)
    }
}
