use std::{fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use multibase::Base;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{GetKeyType, KeyError, KeyResult, KeyType, PublicKeyBytes, WrappedPubKey};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The prefix of every identifier produced by this crate.
pub const DID_WK_PREFIX: &str = "did:wk:";

/// `ed25519-pub` varuint public key code and varuint representation.
const ED25519_PUB_KEY_CODE: (u16, [u8; 2]) = (0xed, [0xED, 0x01]);

/// `p256-pub` varuint public key code and varuint representation.
const P256_PUB_KEY_CODE: (u16, [u8; 2]) = (0x1200, [0x80, 0x24]);

lazy_static! {
    /// Outer shape of a `did:wk` with a base58btc-encoded key and no locator component.
    static ref DID_WK_REGEX: Regex =
        Regex::new(r"^did:wk:(z[1-9A-HJ-NP-Za-km-z]+)$").expect("valid did:wk regex");
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [DID Web Key (`did:wk`)][did-wk] identifier derived from a public key.
///
/// This is the stable `id` a signer is known by: the issuer and audience claims of a token hold these
/// strings, and a verifier can recover the public key from one without any lookup. Only the
/// locator-free form is supported, with the key encoded as [Multicodec][multicodec] in
/// base58btc [Multibase][multibase].
///
/// [did-wk]: https://github.com/zerocore-ai/did-wk
/// [multicodec]: https://github.com/multiformats/multicodec
/// [multibase]: https://github.com/multiformats/multibase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did {
    key_type: KeyType,
    public_key: Vec<u8>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Did {
    /// Derives the identifier of a key.
    pub fn from_key<K>(key: &K) -> Self
    where
        K: PublicKeyBytes + GetKeyType,
    {
        Self {
            key_type: key.key_type(),
            public_key: key.public_key_bytes(),
        }
    }

    /// Returns the type of the key behind this identifier.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Reconstructs the public key behind this identifier.
    pub fn public_key(&self) -> KeyResult<WrappedPubKey> {
        WrappedPubKey::from_bytes(self.key_type, &self.public_key)
    }

    fn multicodec_prefix(&self) -> [u8; 2] {
        match self.key_type {
            KeyType::Ed25519 => ED25519_PUB_KEY_CODE.1,
            KeyType::P256 => P256_PUB_KEY_CODE.1,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut multicodec_enc = self.multicodec_prefix().to_vec();
        multicodec_enc.extend(&self.public_key);

        write!(
            f,
            "{}{}",
            DID_WK_PREFIX,
            multibase::encode(Base::Base58Btc, multicodec_enc)
        )
    }
}

impl FromStr for Did {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = DID_WK_REGEX
            .captures(s)
            .ok_or_else(|| KeyError::InvalidDid(s.to_string()))?;

        let (_, multicodec_enc) = multibase::decode(&captures[1])?;
        if multicodec_enc.len() < 2 {
            return Err(KeyError::InvalidDid(s.to_string()));
        }

        let (prefix, public_key) = multicodec_enc.split_at(2);
        let key_type = match prefix {
            [0xED, 0x01] => KeyType::Ed25519,
            [0x80, 0x24] => KeyType::P256,
            _ => return Err(KeyError::UnsupportedKeyCodec(prefix.to_vec())),
        };

        // Rejects bytes that are not a valid point for the key type.
        WrappedPubKey::from_bytes(key_type, public_key)?;

        Ok(Self {
            key_type,
            public_key: public_key.to_vec(),
        })
    }
}

impl From<&WrappedPubKey> for Did {
    fn from(key: &WrappedPubKey) -> Self {
        Did::from_key(key)
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{Ed25519KeyPair, KeyPairGenerate, P256KeyPair, Sign, Verify};

    use super::*;

    #[test_log::test]
    fn test_did_display_and_parse() -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();

        let ed25519 = Ed25519KeyPair::generate(&mut rng)?;
        let did = Did::from_key(&ed25519);
        let encoded = did.to_string();
        tracing::debug!(?encoded);

        assert!(encoded.starts_with("did:wk:z"));
        assert_eq!(Did::from_str(&encoded)?, did);
        assert_eq!(did.key_type(), KeyType::Ed25519);

        let p256 = P256KeyPair::generate(&mut rng)?;
        let did = Did::from_key(&p256);
        let encoded = did.to_string();
        tracing::debug!(?encoded);

        assert_eq!(Did::from_str(&encoded)?, did);
        assert_eq!(did.key_type(), KeyType::P256);

        Ok(())
    }

    #[test]
    fn test_did_recovers_verifying_key() -> anyhow::Result<()> {
        let key_pair = Ed25519KeyPair::generate(&mut rand::thread_rng())?;
        let did: Did = Did::from_key(&key_pair).to_string().parse()?;

        let signature = key_pair.sign(b"hello")?;
        did.public_key()?.verify(b"hello", &signature)?;

        Ok(())
    }

    #[test]
    fn test_did_rejects_malformed() {
        assert!(Did::from_str("").is_err());
        assert!(Did::from_str("did:key:z6MkktN9TYbYWDPFBhEEZXeD9MyZyUZ2yRNSj5BzDyLBKLkd").is_err());
        assert!(Did::from_str("did:wk:").is_err());
        assert!(Did::from_str("did:wk:z0OIl").is_err());
        assert!(Did::from_str("did:wk:z2").is_err());
        assert!(Did::from_str("alice").is_err());
    }
}
