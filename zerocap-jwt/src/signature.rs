use std::{fmt::Display, ops::Deref, str::FromStr};

use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};

use crate::JwtError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The signature part of a token.
///
/// Covers the ASCII `header.payload` prefix of the compact serialization and was produced by the
/// private key behind the token's `iss` identifier.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct JwtSignature(Vec<u8>);

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtSignature {
    /// Returns the raw bytes of the signature.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwtSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = BASE64_URL_SAFE_NO_PAD.encode(&self.0);
        write!(f, "{}", encoded)
    }
}

impl FromStr for JwtSignature {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(s.as_bytes())?;
        Ok(JwtSignature(decoded))
    }
}

impl From<Vec<u8>> for JwtSignature {
    fn from(signature: Vec<u8>) -> Self {
        Self(signature)
    }
}

impl Deref for JwtSignature {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_signature_display() -> anyhow::Result<()> {
        let signature = JwtSignature::from(vec![1, 2, 3, 4, 5]);

        let displayed = signature.to_string();
        tracing::debug!(?displayed);
        assert_eq!(displayed, "AQIDBAU");

        let parsed = JwtSignature::from_str(&displayed)?;
        assert_eq!(parsed, signature);

        assert!(JwtSignature::from_str("AQ=D").is_err());

        Ok(())
    }
}
