use std::hash::{Hash, Hasher};

use p256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::{
    AsymmetricKey, GetKeyType, JwsAlgName, JwsAlgorithm, KeyPairBytes, KeyPairGenerate,
    KeyResult, KeyType, PubKey, PublicKeyBytes, PublicKeyGenerate, Sign, Verify,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A P-256 public key, used to check `ES256` signatures.
pub type P256PubKey = PubKey<VerifyingKey>;

/// A P-256 key pair that signs capabilities as `ES256`.
pub type P256KeyPair = P256Key<SigningKey>;

pub(crate) type P256Key<S> = AsymmetricKey<VerifyingKey, S>;

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<S> Verify for P256Key<S> {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        self.public
            .verify(data, &Signature::try_from(signature)?)
            .map_err(Into::into)
    }
}

impl Sign for P256KeyPair {
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        let signature: Signature = self.private.try_sign(data)?;
        Ok(signature.to_bytes().to_vec())
    }
}

impl PublicKeyGenerate for P256PubKey {
    /// Accepts compressed or uncompressed SEC1 points.
    fn from_public_key(bytes: &[u8]) -> KeyResult<Self> {
        Ok(Self {
            public: VerifyingKey::from_sec1_bytes(bytes)?,
            private: (),
        })
    }
}

impl KeyPairGenerate for P256KeyPair {
    fn generate(rng: &mut impl CryptoRngCore) -> KeyResult<Self> {
        let signing_key = SigningKey::random(rng);
        Ok(Self {
            public: *signing_key.verifying_key(),
            private: signing_key,
        })
    }

    fn from_private_key(bytes: &[u8]) -> KeyResult<Self> {
        let signing_key = SigningKey::from_slice(bytes)?;
        Ok(Self {
            public: *signing_key.verifying_key(),
            private: signing_key,
        })
    }
}

impl<S> PublicKeyBytes for P256Key<S> {
    /// Compressed SEC1 point, 33 bytes. This is what `did:wk` identifiers carry.
    fn public_key_bytes(&self) -> Vec<u8> {
        self.public.to_encoded_point(true).as_bytes().to_vec()
    }
}

impl KeyPairBytes for P256KeyPair {
    fn private_key_bytes(&self) -> Vec<u8> {
        self.private.to_bytes().to_vec()
    }
}

impl<S> JwsAlgName for P256Key<S> {
    fn alg(&self) -> JwsAlgorithm {
        JwsAlgorithm::ES256
    }
}

impl<S> GetKeyType for P256Key<S> {
    fn key_type(&self) -> KeyType {
        KeyType::P256
    }
}

impl From<P256KeyPair> for P256PubKey {
    fn from(key_pair: P256KeyPair) -> Self {
        Self {
            public: key_pair.public,
            private: (),
        }
    }
}

impl Hash for P256PubKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.public_key_bytes().hash(state);
    }
}

impl Serialize for P256PubKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.public_key_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for P256PubKey {
    fn deserialize<D>(deserializer: D) -> Result<P256PubKey, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        P256PubKey::from_public_key(&bytes).map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p256_generate() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let key_pair = P256KeyPair::generate(&mut rng)?;

        let public_key_bytes = key_pair.public_key_bytes();
        assert_eq!(public_key_bytes.len(), 33);

        let public_key = P256PubKey::from_public_key(&public_key_bytes)?;
        assert_eq!(P256PubKey::from(key_pair.clone()), public_key);

        let private_key_bytes = key_pair.private_key_bytes();
        let private_key = P256KeyPair::from_private_key(&private_key_bytes)?;

        assert_eq!(key_pair, private_key);

        Ok(())
    }

    #[test]
    fn test_p256_sign_and_verify() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let key_pair = P256KeyPair::generate(&mut rng)?;

        let data = include_bytes!("../fixtures/data.txt");
        let signature = key_pair.sign(data)?;
        assert_eq!(signature.len(), 64);

        key_pair.verify(data, &signature)?;
        key_pair.public_key().verify(data, &signature)?;

        assert!(key_pair.verify(b"tampered", &signature).is_err());

        Ok(())
    }

    #[test_log::test]
    fn test_p256_pub_key_serde() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();
        let pub_key = P256PubKey::from(P256KeyPair::generate(&mut rng)?);

        let serialized = serde_json::to_string(&pub_key)?;
        tracing::debug!(?serialized);
        let deserialized = serde_json::from_str(&serialized)?;
        assert_eq!(pub_key, deserialized);

        Ok(())
    }
}
