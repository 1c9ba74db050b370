use std::{fmt::Display, str::FromStr};

use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use zerocap_key::WrappedPubKey;

use crate::{JwtError, JwtHeader, JwtResult, JwtSignature, JwtSigner};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A signed token with a payload of type `P`.
///
/// Tokens are immutable values once signed. A decoded token keeps the exact `header.payload` text it
/// was parsed from in `data`, so its signature can be checked without re-serializing the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<P = Value> {
    /// The header of the token, naming the signing algorithm.
    pub header: JwtHeader,

    /// The claims carried by the token.
    pub payload: P,

    /// The signature over `data`.
    pub signature: JwtSignature,

    /// The signed `header.payload` prefix of the compact serialization.
    pub data: String,

    /// The issuer's public key, present only after [`verify`][crate::verify] succeeded.
    pub verified_public_key: Option<WrappedPubKey>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<P> Token<P> {
    /// Returns `true` if the signature of this token has been checked.
    pub fn is_verified(&self) -> bool {
        self.verified_public_key.is_some()
    }
}

impl Token<Value> {
    /// Re-types the payload of a decoded token.
    pub fn into_typed<T>(self) -> JwtResult<Token<T>>
    where
        T: DeserializeOwned,
    {
        Ok(Token {
            header: self.header,
            payload: serde_json::from_value(self.payload)?,
            signature: self.signature,
            data: self.data,
            verified_public_key: self.verified_public_key,
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Signs a payload, producing a token.
///
/// The header defaults to the signer's algorithm. An explicit header naming a different algorithm
/// is rejected.
pub async fn sign<S, P>(signer: &S, payload: P, header: Option<JwtHeader>) -> JwtResult<Token<P>>
where
    S: JwtSigner + ?Sized,
    P: Serialize,
{
    let header = match header {
        Some(header) if header.alg() != signer.alg() => {
            return Err(JwtError::AlgorithmMismatch {
                expected: signer.alg(),
                found: header.alg(),
            })
        }
        Some(header) => header,
        None => JwtHeader::from(signer.alg()),
    };

    let json = serde_json::to_vec(&payload)?;
    let data = format!("{}.{}", header, BASE64_URL_SAFE_NO_PAD.encode(json));
    let signature = signer.sign(data.as_bytes()).await?;

    Ok(Token {
        header,
        payload,
        signature: signature.into(),
        data,
        verified_public_key: None,
    })
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<P> Display for Token<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.data, self.signature)
    }
}

/// Decodes without verifying the signature.
impl FromStr for Token<Value> {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();

        if parts.len() != 3 {
            return Err(JwtError::Malformed(format!(
                "expected 3 dot-separated parts, found {}",
                parts.len()
            )));
        }

        let header = parts[0].parse()?;
        let payload: Value = serde_json::from_slice(&BASE64_URL_SAFE_NO_PAD.decode(parts[1])?)?;
        if !payload.is_object() {
            return Err(JwtError::Malformed("payload is not a JSON object".into()));
        }

        let signature = parts[2].parse()?;

        Ok(Self {
            header,
            payload,
            signature,
            data: format!("{}.{}", parts[0], parts[1]),
            verified_public_key: None,
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use zerocap_key::{Ed25519KeyPair, JwsAlgorithm, KeyPairGenerate};

    use crate::KeySigner;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Claims {
        iss: String,
        msg: String,
    }

    fn signer() -> anyhow::Result<KeySigner<Ed25519KeyPair>> {
        let key = Ed25519KeyPair::from_private_key(&[
            190, 244, 147, 155, 83, 151, 225, 133, 7, 166, 15, 183, 157, 168, 142, 25, 128, 4, 106,
            34, 199, 60, 60, 9, 190, 179, 2, 196, 179, 179, 64, 134,
        ])?;

        Ok(KeySigner::new(key))
    }

    #[test_log::test(tokio::test)]
    async fn test_token_sign_display_parse() -> anyhow::Result<()> {
        let signer = signer()?;
        let claims = Claims {
            iss: signer.id().to_string(),
            msg: "hello".into(),
        };

        let token = sign(&signer, claims.clone(), None).await?;
        assert_eq!(token.header.alg(), JwsAlgorithm::EdDSA);
        assert!(!token.is_verified());

        let encoded = token.to_string();
        tracing::debug!(?encoded);
        assert_eq!(encoded.split('.').count(), 3);
        assert!(encoded.starts_with("eyJhbGciOiJFZERTQSIsInR5cCI6IkpXVCJ9."));

        let decoded: Token = encoded.parse()?;
        assert_eq!(decoded.data, token.data);
        assert_eq!(decoded.signature, token.signature);

        let typed = decoded.into_typed::<Claims>()?;
        assert_eq!(typed.payload, claims);

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_token_sign_rejects_mismatched_header() -> anyhow::Result<()> {
        let signer = signer()?;
        let result = sign(
            &signer,
            serde_json::json!({ "iss": signer.id() }),
            Some(JwtHeader::from(JwsAlgorithm::ES256)),
        )
        .await;

        assert!(matches!(
            result,
            Err(JwtError::AlgorithmMismatch {
                expected: JwsAlgorithm::EdDSA,
                found: JwsAlgorithm::ES256
            })
        ));

        Ok(())
    }

    #[test]
    fn test_token_parse_rejects_malformed() {
        assert!(matches!(
            "abc.def".parse::<Token>(),
            Err(JwtError::Malformed(_))
        ));
        assert!("a.b.c.d".parse::<Token>().is_err());
        assert!("".parse::<Token>().is_err());

        // Payload must be an object.
        let header = JwtHeader::default().to_string();
        let payload = BASE64_URL_SAFE_NO_PAD.encode("[1,2]");
        assert!(matches!(
            format!("{header}.{payload}.AQID").parse::<Token>(),
            Err(JwtError::Malformed(_))
        ));

        // Payload must be json.
        let payload = BASE64_URL_SAFE_NO_PAD.encode("not json");
        assert!(matches!(
            format!("{header}.{payload}.AQID").parse::<Token>(),
            Err(JwtError::JsonError(_))
        ));
    }
}
