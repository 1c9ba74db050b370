use serde::{Deserialize, Serialize};

use crate::{
    assert_non_expired, assert_valid_delegation, CapError, CapResult, CapabilityPayload,
    CapabilityToken, CapabilityVerifier,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Serialized capabilities that link a capability back to a root capability.
///
/// The chain is stored from the leaf to the root: the first element is the parent of the
/// capability the chain is presented with, each following element is the parent of the one before
/// it, and the last element must be a root capability issued by the subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelegationChain(Vec<String>);

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DelegationChain {
    /// Creates a chain from capabilities ordered from the leaf to the root.
    pub fn from_leaf_to_root(capabilities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(capabilities.into_iter().map(Into::into).collect())
    }

    /// Creates a chain from capabilities ordered from the root to the leaf.
    pub fn from_root_to_leaf(capabilities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut chain = Self::from_leaf_to_root(capabilities);
        chain.0.reverse();
        chain
    }

    /// Returns the chain to present with a capability delegated under `parent`.
    ///
    /// `self` is the chain `parent` was itself presented with.
    pub fn delegate(&self, parent: impl Into<String>) -> Self {
        let mut capabilities = Vec::with_capacity(self.0.len() + 1);
        capabilities.push(parent.into());
        capabilities.extend(self.0.iter().cloned());
        Self(capabilities)
    }

    /// Returns the capability nearest to the acting party.
    pub fn leaf(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns the root capability.
    pub fn root(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns the number of capabilities in the chain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the chain holds no capability.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the capabilities from the leaf to the root.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl CapabilityVerifier {
    /// Checks that `chain` links `payload` back to a root capability issued by its subject.
    ///
    /// Each capability of the chain is decoded and its signature verified, then checked to be a
    /// valid delegation to the link before it. The chain must end at a capability issued by
    /// `payload`'s subject that is not expired at `at`. An empty chain requires `payload` itself
    /// to be an unexpired root capability.
    ///
    /// Chains longer than the configured maximum depth are rejected before anything is decoded.
    ///
    /// Returns the decoded capabilities of the chain from the leaf to the root.
    pub async fn check_delegation_chain(
        &self,
        payload: &CapabilityPayload,
        chain: &DelegationChain,
        at: u64,
    ) -> CapResult<Vec<CapabilityToken>> {
        let max = self.config().max_depth;
        if chain.len() > max {
            tracing::warn!(depth = chain.len(), max, "delegation chain rejected");
            return Err(CapError::DepthExceeded {
                depth: chain.len(),
                max,
            });
        }

        if chain.is_empty() {
            if !payload.is_root() {
                return Err(CapError::IssuerNotSubject {
                    issuer: payload.issuer.clone(),
                    subject: payload.subject.clone(),
                });
            }

            assert_non_expired(payload, at)?;
            return Ok(Vec::new());
        }

        let mut ancestors: Vec<CapabilityToken> = Vec::with_capacity(chain.len());
        for encoded in chain.iter() {
            let parent = self.decode(encoded).await?;
            let child = ancestors.last().map_or(payload, |token| &token.payload);

            assert_valid_delegation(&parent.payload, child, at)?;
            tracing::debug!(
                depth = ancestors.len(),
                issuer = parent.payload.issuer(),
                audience = parent.payload.audience(),
                "delegation link verified"
            );

            ancestors.push(parent);
        }

        if let Some(root) = ancestors.last() {
            if root.payload.issuer != payload.subject {
                return Err(CapError::IssuerNotSubject {
                    issuer: root.payload.issuer.clone(),
                    subject: payload.subject.clone(),
                });
            }

            assert_non_expired(&root.payload, at)?;
        }

        tracing::debug!(
            subject = payload.subject(),
            depth = ancestors.len(),
            "delegation chain accepted"
        );

        Ok(ancestors)
    }

    /// [`check_delegation_chain`][Self::check_delegation_chain] at the current time.
    pub async fn check_delegation_chain_now(
        &self,
        payload: &CapabilityPayload,
        chain: &DelegationChain,
    ) -> CapResult<Vec<CapabilityToken>> {
        self.check_delegation_chain(payload, chain, crate::now())
            .await
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<Vec<String>> for DelegationChain {
    fn from(capabilities: Vec<String>) -> Self {
        Self(capabilities)
    }
}

impl<'a> IntoIterator for &'a DelegationChain {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_ordering() {
        let chain = DelegationChain::from_root_to_leaf(["root", "middle", "leaf"]);
        assert_eq!(chain.leaf(), Some("leaf"));
        assert_eq!(chain.root(), Some("root"));
        assert_eq!(
            chain.iter().collect::<Vec<_>>(),
            vec!["leaf", "middle", "root"]
        );
        assert_eq!(
            chain,
            DelegationChain::from_leaf_to_root(["leaf", "middle", "root"])
        );
    }

    #[test]
    fn test_chain_delegate() {
        let chain = DelegationChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.leaf(), None);

        let chain = chain.delegate("root").delegate("middle");
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.leaf(), Some("middle"));
        assert_eq!(chain.root(), Some("root"));
    }

    #[test]
    fn test_chain_serde() -> anyhow::Result<()> {
        let chain = DelegationChain::from_leaf_to_root(["b", "a"]);
        assert_eq!(serde_json::to_string(&chain)?, r#"["b","a"]"#);
        assert_eq!(serde_json::from_str::<DelegationChain>(r#"["b","a"]"#)?, chain);

        Ok(())
    }
}
