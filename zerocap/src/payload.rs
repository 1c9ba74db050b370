use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};
use zerocap_jwt::Token;

use crate::{DelegationChain, Permission};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The claims of a capability.
///
/// `iss` and `aud` are signer identifiers, and `sub` is the identifier of the party whose rights
/// the capability ultimately traces back to. A capability with `iss == sub` is a root capability.
/// `exp`, when present, is an exclusive upper bound on validity in epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityPayload {
    #[serde(rename = "iss")]
    pub(crate) issuer: String,

    #[serde(rename = "sub")]
    pub(crate) subject: String,

    #[serde(rename = "aud")]
    pub(crate) audience: String,

    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub(crate) expiration: Option<u64>,

    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub(crate) issued_at: Option<u64>,

    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    #[serde(flatten)]
    pub(crate) permission: Permission,
}

/// A capability that has not been assigned an issuer yet.
///
/// This is what gets handed to [`CapabilityVerifier::create_capability`][crate::CapabilityVerifier::create_capability],
/// which sets the issuer to the signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDraft {
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub(crate) issuer: Option<String>,

    #[serde(rename = "sub")]
    pub(crate) subject: String,

    #[serde(rename = "aud")]
    pub(crate) audience: String,

    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub(crate) expiration: Option<u64>,

    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub(crate) issued_at: Option<u64>,

    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    #[serde(flatten)]
    pub(crate) permission: Permission,
}

/// The payload presented with a request.
///
/// Either a root capability checked on its own, or a capability together with the chain of
/// serialized capabilities (`cap`) it was delegated through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    #[serde(flatten)]
    pub(crate) capability: CapabilityPayload,

    #[serde(
        default,
        deserialize_with = "deserialize_chain",
        skip_serializing_if = "DelegationChain::is_empty"
    )]
    pub(crate) cap: DelegationChain,
}

/// A signed capability.
pub type CapabilityToken = Token<CapabilityPayload>;

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CapabilityPayload {
    /// Returns the issuer of the capability.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the subject of the capability.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the audience of the capability.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Returns the expiration of the capability, in epoch seconds.
    pub fn expiration(&self) -> Option<u64> {
        self.expiration
    }

    /// Returns the time the capability was issued at, in epoch seconds.
    pub fn issued_at(&self) -> Option<u64> {
        self.issued_at
    }

    /// Returns the id of the capability.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the permission granted by the capability.
    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    /// Returns `true` if the capability was issued by its own subject.
    pub fn is_root(&self) -> bool {
        self.issuer == self.subject
    }
}

impl CapabilityDraft {
    /// Returns the issuer, if one was set.
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Returns the subject of the capability.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the audience of the capability.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Returns the permission the capability would grant.
    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    /// Completes the draft with `issuer`, replacing any issuer it already had.
    pub fn into_payload(self, issuer: impl Into<String>) -> CapabilityPayload {
        CapabilityPayload {
            issuer: issuer.into(),
            subject: self.subject,
            audience: self.audience,
            expiration: self.expiration,
            issued_at: self.issued_at,
            id: self.id,
            permission: self.permission,
        }
    }
}

impl RequestPayload {
    /// Creates a request payload from a capability and the chain it was delegated through.
    pub fn new(capability: CapabilityPayload, cap: DelegationChain) -> Self {
        Self { capability, cap }
    }

    /// Returns the capability presented with the request.
    pub fn capability(&self) -> &CapabilityPayload {
        &self.capability
    }

    /// Returns the chain the capability was delegated through.
    pub fn chain(&self) -> &DelegationChain {
        &self.cap
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// A `null` chain reads as an empty one.
fn deserialize_chain<'de, D>(deserializer: D) -> Result<DelegationChain, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DelegationChain>::deserialize(deserializer)?.unwrap_or_default())
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<CapabilityPayload> for CapabilityDraft {
    fn from(payload: CapabilityPayload) -> Self {
        Self {
            issuer: Some(payload.issuer),
            subject: payload.subject,
            audience: payload.audience,
            expiration: payload.expiration,
            issued_at: payload.issued_at,
            id: payload.id,
            permission: payload.permission,
        }
    }
}

impl From<CapabilityPayload> for RequestPayload {
    fn from(capability: CapabilityPayload) -> Self {
        Self::new(capability, DelegationChain::default())
    }
}

impl Deref for RequestPayload {
    type Target = CapabilityPayload;

    fn deref(&self) -> &Self::Target {
        &self.capability
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test_log::test]
    fn test_payload_serde() -> anyhow::Result<()> {
        let payload = CapabilityPayload {
            issuer: "alice".into(),
            subject: "alice".into(),
            audience: "bob".into(),
            expiration: Some(1_000),
            issued_at: None,
            id: None,
            permission: Permission::new("test/read", "foo/bar"),
        };

        let value = serde_json::to_value(&payload)?;
        tracing::debug!(?value);
        assert_eq!(
            value,
            json!({
                "iss": "alice",
                "sub": "alice",
                "aud": "bob",
                "exp": 1_000,
                "act": "test/read",
                "res": "foo/bar",
            })
        );

        let deserialized: CapabilityPayload = serde_json::from_value(value)?;
        assert_eq!(deserialized, payload);
        assert!(deserialized.is_root());

        Ok(())
    }

    #[test_log::test]
    fn test_request_payload_serde() -> anyhow::Result<()> {
        let value = json!({
            "iss": "carol",
            "sub": "alice",
            "aud": "dave",
            "act": ["test/read"],
            "res": "foo/*",
            "cap": ["b.b.b", "a.a.a"],
        });

        let request: RequestPayload = serde_json::from_value(value.clone())?;
        assert_eq!(request.issuer(), "carol");
        assert!(!request.is_root());
        assert_eq!(request.chain().len(), 2);
        assert_eq!(request.chain().leaf(), Some("b.b.b"));
        assert_eq!(serde_json::to_value(&request)?, value);

        // A null chain is an empty one.
        let mut null_chain = value.clone();
        null_chain["cap"] = serde_json::Value::Null;
        let request: RequestPayload = serde_json::from_value(null_chain)?;
        assert!(request.chain().is_empty());

        // Empty chains are left off the wire.
        let request = RequestPayload::from(request.capability().clone());
        assert!(serde_json::to_value(&request)?.get("cap").is_none());

        Ok(())
    }

    #[test]
    fn test_draft_into_payload_sets_issuer() {
        let draft = CapabilityDraft {
            issuer: Some("mallory".into()),
            subject: "alice".into(),
            audience: "bob".into(),
            expiration: None,
            issued_at: None,
            id: Some("1".into()),
            permission: Permission::new("test/read", "foo/bar"),
        };

        let payload = draft.into_payload("alice");
        assert_eq!(payload.issuer(), "alice");
        assert_eq!(payload.id(), Some("1"));
        assert!(payload.is_root());
    }
}
