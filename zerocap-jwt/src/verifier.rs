use std::{fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use zerocap_key::{Did, JwsAlgorithm, Verify, WrappedPubKey};

use crate::{JwtError, JwtResult, Token};

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Checks signatures for one JWS algorithm.
#[async_trait]
pub trait JwsVerifier: Send + Sync {
    /// Verifies `signature` over `data` as produced by `issuer`, returning the key it verified with.
    async fn verify(
        &self,
        issuer: &str,
        data: &[u8],
        signature: &[u8],
    ) -> JwtResult<WrappedPubKey>;
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [`JwsVerifier`] that recovers the issuer's public key from its `did:wk` identifier.
#[derive(Debug, Clone, Copy)]
pub struct DidVerifier {
    alg: JwsAlgorithm,
}

/// The verifiers to use per header algorithm.
///
/// A token whose header names an algorithm with no registered verifier is rejected.
#[derive(Clone)]
pub struct Verifiers {
    eddsa: Option<Arc<dyn JwsVerifier>>,
    es256: Option<Arc<dyn JwsVerifier>>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DidVerifier {
    /// Creates a verifier for `alg`.
    pub fn new(alg: JwsAlgorithm) -> Self {
        Self { alg }
    }
}

impl Verifiers {
    /// Creates a set with no verifiers, which rejects every token.
    pub fn empty() -> Self {
        Self {
            eddsa: None,
            es256: None,
        }
    }

    /// Creates a set with the built-in [`DidVerifier`] for each of `algs`.
    pub fn for_algorithms(algs: impl IntoIterator<Item = JwsAlgorithm>) -> Self {
        algs.into_iter()
            .fold(Self::empty(), |verifiers, alg| {
                verifiers.with(alg, DidVerifier::new(alg))
            })
    }

    /// Registers `verifier` for `alg`, replacing any previous one.
    pub fn with(mut self, alg: JwsAlgorithm, verifier: impl JwsVerifier + 'static) -> Self {
        *self.slot_mut(alg) = Some(Arc::new(verifier));
        self
    }

    /// Removes the verifier for `alg`.
    pub fn without(mut self, alg: JwsAlgorithm) -> Self {
        *self.slot_mut(alg) = None;
        self
    }

    /// Returns the verifier registered for `alg`.
    pub fn get(&self, alg: JwsAlgorithm) -> Option<&dyn JwsVerifier> {
        match alg {
            JwsAlgorithm::EdDSA => self.eddsa.as_deref(),
            JwsAlgorithm::ES256 => self.es256.as_deref(),
        }
    }

    /// Returns the algorithms that have a verifier.
    pub fn algorithms(&self) -> Vec<JwsAlgorithm> {
        [JwsAlgorithm::EdDSA, JwsAlgorithm::ES256]
            .into_iter()
            .filter(|alg| self.get(*alg).is_some())
            .collect()
    }

    fn slot_mut(&mut self, alg: JwsAlgorithm) -> &mut Option<Arc<dyn JwsVerifier>> {
        match alg {
            JwsAlgorithm::EdDSA => &mut self.eddsa,
            JwsAlgorithm::ES256 => &mut self.es256,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Decodes a compact token and verifies its signature against the key of its `iss` claim.
///
/// On success the returned token has `verified_public_key` set. The payload is returned untyped;
/// callers must check its shape before trusting any field other than `iss`.
pub async fn verify(token: &str, verifiers: &Verifiers) -> JwtResult<Token<Value>> {
    let mut token: Token<Value> = token.parse()?;

    let alg = token.header.alg();
    let verifier = verifiers
        .get(alg)
        .ok_or(JwtError::UnsupportedAlgorithm(alg))?;

    let issuer = token
        .payload
        .get("iss")
        .and_then(Value::as_str)
        .ok_or(JwtError::MissingIssuer)?;

    let key = verifier
        .verify(issuer, token.data.as_bytes(), token.signature.as_bytes())
        .await?;

    tracing::trace!(%alg, issuer, "token signature verified");
    token.verified_public_key = Some(key);

    Ok(token)
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

#[async_trait]
impl JwsVerifier for DidVerifier {
    async fn verify(
        &self,
        issuer: &str,
        data: &[u8],
        signature: &[u8],
    ) -> JwtResult<WrappedPubKey> {
        let did =
            Did::from_str(issuer).map_err(|e| JwtError::InvalidIssuer(issuer.to_string(), e))?;

        if did.key_type() != self.alg.key_type() {
            return Err(JwtError::AlgorithmMismatch {
                expected: did.key_type().alg(),
                found: self.alg,
            });
        }

        let key = did.public_key()?;
        key.verify(data, signature)
            .map_err(|e| JwtError::SignatureInvalid(e.to_string()))?;

        Ok(key)
    }
}

impl Default for Verifiers {
    fn default() -> Self {
        Self::for_algorithms([JwsAlgorithm::EdDSA, JwsAlgorithm::ES256])
    }
}

impl fmt::Debug for Verifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifiers")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
