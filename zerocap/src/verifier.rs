use zerocap_jwt::{Token, Verifiers};
use zerocap_key::JwsAlgorithm;

use crate::{
    assert_capability_token, assert_request_payload, CapResult, CapabilityToken, RequestPayload,
    VerifierConfig,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Decodes and checks capabilities.
///
/// Holds the signature verifiers used to decode the capabilities of a chain and the limits chains
/// are checked against. It has no mutable state, so one instance can serve any number of
/// concurrent checks.
#[derive(Debug, Clone, Default)]
pub struct CapabilityVerifier {
    verifiers: Verifiers,
    config: VerifierConfig,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CapabilityVerifier {
    /// Creates a verifier from custom signature verifiers.
    ///
    /// Verifiers for algorithms the configuration does not accept are dropped.
    pub fn new(verifiers: Verifiers, config: VerifierConfig) -> CapResult<Self> {
        config.validate()?;

        let verifiers = [JwsAlgorithm::EdDSA, JwsAlgorithm::ES256]
            .into_iter()
            .filter(|alg| !config.algorithms.contains(alg))
            .fold(verifiers, Verifiers::without);

        Ok(Self { verifiers, config })
    }

    /// Creates a verifier that uses the built-in `did:wk` signature verifier for every accepted
    /// algorithm.
    pub fn from_config(config: VerifierConfig) -> CapResult<Self> {
        let verifiers = Verifiers::for_algorithms(config.algorithms.iter().copied());
        Self::new(verifiers, config)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Returns the signature verifiers.
    pub fn verifiers(&self) -> &Verifiers {
        &self.verifiers
    }

    /// Decodes a serialized capability, verifying its signature and its shape.
    pub async fn decode(&self, token: &str) -> CapResult<CapabilityToken> {
        let token = zerocap_jwt::verify(token, &self.verifiers).await?;
        assert_capability_token(&token)?;
        Ok(token.into_typed()?)
    }

    /// Decodes a serialized request, verifying its signature and its shape.
    pub async fn decode_request(&self, token: &str) -> CapResult<Token<RequestPayload>> {
        let token = zerocap_jwt::verify(token, &self.verifiers).await?;
        assert_request_payload(&token.payload)?;
        Ok(token.into_typed()?)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;
    use zerocap_jwt::{sign, JwtError, JwtSigner, KeySigner};
    use zerocap_key::{Ed25519KeyPair, KeyPairGenerate, P256KeyPair};

    use crate::{CapError, DEFAULT_MAX_DEPTH};

    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_decode_checks_shape() -> anyhow::Result<()> {
        let signer = KeySigner::new(Ed25519KeyPair::generate(&mut rand::thread_rng())?);
        let verifier = CapabilityVerifier::default();
        assert_eq!(verifier.config().max_depth, DEFAULT_MAX_DEPTH);

        let token = sign(
            &signer,
            json!({
                "iss": signer.id(),
                "sub": signer.id(),
                "aud": "did:wk:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK",
                "act": "test/read",
                "res": "foo/bar",
            }),
            None,
        )
        .await?;

        let decoded = verifier.decode(&token.to_string()).await?;
        assert!(decoded.is_verified());
        assert!(decoded.payload.is_root());

        let token = sign(
            &signer,
            json!({ "iss": signer.id(), "sub": signer.id(), "aud": 1, "act": "a", "res": "b" }),
            None,
        )
        .await?;

        let result = verifier.decode(&token.to_string()).await;
        assert!(matches!(result, Err(CapError::MalformedToken(_))));

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_decode_request() -> anyhow::Result<()> {
        let signer = KeySigner::new(Ed25519KeyPair::generate(&mut rand::thread_rng())?);
        let verifier = CapabilityVerifier::default();

        let token = sign(
            &signer,
            json!({
                "iss": signer.id(),
                "sub": "alice",
                "aud": "bob",
                "act": "test/read",
                "res": "foo/bar",
                "cap": ["x.y.z"],
            }),
            None,
        )
        .await?;

        let decoded = verifier.decode_request(&token.to_string()).await?;
        assert_eq!(decoded.payload.chain().leaf(), Some("x.y.z"));
        assert_eq!(decoded.payload.subject(), "alice");

        // A null chain decodes as an empty one.
        let payload = json!({
            "iss": signer.id(),
            "sub": signer.id(),
            "aud": "bob",
            "act": "test/read",
            "res": "foo/bar",
            "cap": null,
        });
        assert!(crate::is_request_payload(&payload));

        let token = sign(&signer, payload, None).await?;
        let decoded = verifier.decode_request(&token.to_string()).await?;
        assert!(decoded.payload.chain().is_empty());
        assert!(decoded.payload.is_root());

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_from_config_restricts_algorithms() -> anyhow::Result<()> {
        let signer = KeySigner::new(P256KeyPair::generate(&mut rand::thread_rng())?);
        let verifier = CapabilityVerifier::from_config(
            VerifierConfig::builder()
                .algorithms(vec![JwsAlgorithm::EdDSA])
                .build(),
        )?;
        assert_eq!(verifier.verifiers().algorithms(), vec![JwsAlgorithm::EdDSA]);

        let token = sign(
            &signer,
            json!({ "iss": signer.id(), "sub": signer.id(), "aud": signer.id(), "act": "a", "res": "b" }),
            None,
        )
        .await?;

        let result = verifier.decode(&token.to_string()).await;
        assert!(matches!(
            result,
            Err(CapError::Token(JwtError::UnsupportedAlgorithm(
                JwsAlgorithm::ES256
            )))
        ));

        assert!(CapabilityVerifier::from_config(
            VerifierConfig::builder().max_depth(0).build()
        )
        .is_err());

        Ok(())
    }
}
