use std::{fmt::Display, str::FromStr};

use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use zerocap_key::JwsAlgorithm;

use crate::JwtError;

//--------------------------------------------------------------------------------------------------
// Constant
//--------------------------------------------------------------------------------------------------

/// The only `typ` a token header may carry.
pub const TYPE: &str = "JWT";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The first segment of a compact token.
///
/// Serializes as `{"alg": ..., "typ": "JWT"}`. Parsing rejects any other `typ` and any algorithm
/// outside `EdDSA` and `ES256`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct JwtHeader {
    alg: JwsAlgorithm,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtHeader {
    /// Returns the signing algorithm.
    pub fn alg(&self) -> JwsAlgorithm {
        self.alg
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Serialize for JwtHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde_json::json!({
            "typ": TYPE,
            "alg": self.alg,
        })
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JwtHeader {
    fn deserialize<D>(deserializer: D) -> Result<JwtHeader, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Header {
            alg: JwsAlgorithm,
            typ: String,
        }

        let header = Header::deserialize(deserializer)?;

        if header.typ != TYPE {
            return Err(serde::de::Error::custom(JwtError::UnsupportedTokenType(
                header.typ,
            )));
        }

        Ok(JwtHeader { alg: header.alg })
    }
}

impl Display for JwtHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        let encoded = BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes());
        write!(f, "{}", encoded)
    }
}

impl FromStr for JwtHeader {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(s.as_bytes())?;
        serde_json::from_slice(&decoded).map_err(JwtError::from)
    }
}

impl Default for JwtHeader {
    fn default() -> Self {
        Self {
            alg: JwsAlgorithm::EdDSA,
        }
    }
}

impl From<JwsAlgorithm> for JwtHeader {
    fn from(alg: JwsAlgorithm) -> Self {
        Self { alg }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
