use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{KeyError, KeyType};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// JSON Web Signature (JWS) algorithm.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JwsAlgorithm {
    /// EdDSA algorithm.
    #[serde(rename = "EdDSA")]
    EdDSA,

    /// ECDSA using P-256 and SHA-256.
    #[serde(rename = "ES256")]
    ES256,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwsAlgorithm {
    /// Returns the key type that produces signatures for this algorithm.
    pub fn key_type(&self) -> KeyType {
        match self {
            JwsAlgorithm::EdDSA => KeyType::Ed25519,
            JwsAlgorithm::ES256 => KeyType::P256,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwsAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwsAlgorithm::EdDSA => write!(f, "EdDSA"),
            JwsAlgorithm::ES256 => write!(f, "ES256"),
        }
    }
}

impl FromStr for JwsAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EdDSA" => Ok(JwsAlgorithm::EdDSA),
            "ES256" => Ok(JwsAlgorithm::ES256),
            s => Err(KeyError::UnsupportedJwsAlgName(s.to_string())),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
