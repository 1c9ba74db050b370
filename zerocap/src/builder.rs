use crate::{CapabilityDraft, CapabilityPayload, DelegationChain, Permission, RequestPayload};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A builder for capability payloads.
///
/// Subject, audience and permission are required. Without an issuer the builder produces a
/// [`CapabilityDraft`] to be completed by the signer, with one it produces a full
/// [`CapabilityPayload`].
pub struct CapabilityBuilder<I = (), S = (), A = (), P = ()> {
    issuer: I,
    subject: S,
    audience: A,
    permission: P,
    expiration: Option<u64>,
    issued_at: Option<u64>,
    id: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<I, S, A, P> CapabilityBuilder<I, S, A, P> {
    /// Sets the issuer of the capability.
    pub fn issuer(self, issuer: impl Into<String>) -> CapabilityBuilder<String, S, A, P> {
        CapabilityBuilder {
            issuer: issuer.into(),
            subject: self.subject,
            audience: self.audience,
            permission: self.permission,
            expiration: self.expiration,
            issued_at: self.issued_at,
            id: self.id,
        }
    }

    /// Sets the subject whose rights the capability grants.
    pub fn subject(self, subject: impl Into<String>) -> CapabilityBuilder<I, String, A, P> {
        CapabilityBuilder {
            issuer: self.issuer,
            subject: subject.into(),
            audience: self.audience,
            permission: self.permission,
            expiration: self.expiration,
            issued_at: self.issued_at,
            id: self.id,
        }
    }

    /// Sets the audience the capability is granted to.
    pub fn audience(self, audience: impl Into<String>) -> CapabilityBuilder<I, S, String, P> {
        CapabilityBuilder {
            issuer: self.issuer,
            subject: self.subject,
            audience: audience.into(),
            permission: self.permission,
            expiration: self.expiration,
            issued_at: self.issued_at,
            id: self.id,
        }
    }

    /// Sets the permission granted.
    pub fn permission(self, permission: Permission) -> CapabilityBuilder<I, S, A, Permission> {
        CapabilityBuilder {
            issuer: self.issuer,
            subject: self.subject,
            audience: self.audience,
            permission,
            expiration: self.expiration,
            issued_at: self.issued_at,
            id: self.id,
        }
    }

    /// Sets the time, in epoch seconds, from which the capability is no longer valid.
    pub fn expiration(mut self, expiration: u64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Sets the time, in epoch seconds, the capability is issued at.
    pub fn issued_at(mut self, issued_at: u64) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    /// Sets an id for the capability.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl CapabilityBuilder<(), String, String, Permission> {
    /// Builds a draft whose issuer is set when it is signed.
    pub fn build(self) -> CapabilityDraft {
        CapabilityDraft {
            issuer: None,
            subject: self.subject,
            audience: self.audience,
            expiration: self.expiration,
            issued_at: self.issued_at,
            id: self.id,
            permission: self.permission,
        }
    }
}

impl CapabilityBuilder<String, String, String, Permission> {
    /// Builds the payload.
    pub fn build(self) -> CapabilityPayload {
        CapabilityPayload {
            issuer: self.issuer,
            subject: self.subject,
            audience: self.audience,
            expiration: self.expiration,
            issued_at: self.issued_at,
            id: self.id,
            permission: self.permission,
        }
    }

    /// Builds a request payload presenting the capability together with the chain it was
    /// delegated through.
    pub fn with_chain(self, chain: DelegationChain) -> RequestPayload {
        RequestPayload::new(self.build(), chain)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for CapabilityBuilder {
    fn default() -> Self {
        CapabilityBuilder {
            issuer: (),
            subject: (),
            audience: (),
            permission: (),
            expiration: None,
            issued_at: None,
            id: None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
