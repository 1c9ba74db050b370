use zerocap_jwt::{JwtHeader, JwtSigner};

use crate::{
    has_permission, CapError, CapResult, CapabilityDraft, CapabilityToken, CapabilityVerifier,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Options for issuing a capability.
#[derive(Debug, Clone, Default)]
pub struct IssueOptions {
    /// The serialized capability the new one is delegated under. Required unless the signer is the
    /// subject.
    pub parent_capability: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl IssueOptions {
    /// Issues under `parent`.
    pub fn with_parent(parent: impl Into<String>) -> Self {
        Self {
            parent_capability: Some(parent.into()),
        }
    }
}

impl CapabilityVerifier {
    /// Creates and signs a capability, with `signer` as the issuer.
    ///
    /// If the signer is the subject, the result is a root capability and no parent is needed.
    /// Otherwise `options.parent_capability` must be a capability whose audience is the signer,
    /// that grants at least the drafted permission and that is about the same subject.
    pub async fn create_capability<S>(
        &self,
        signer: &S,
        draft: impl Into<CapabilityDraft>,
        header: Option<JwtHeader>,
        options: IssueOptions,
    ) -> CapResult<CapabilityToken>
    where
        S: JwtSigner + ?Sized,
    {
        let draft = draft.into();

        if draft.subject == signer.id() {
            tracing::debug!(subject = signer.id(), "issuing root capability");
        } else {
            let encoded = options
                .parent_capability
                .ok_or_else(|| CapError::MissingParentCapability(draft.subject.clone()))?;
            let parent = self.decode(&encoded).await?.payload;

            if parent.audience != signer.id() {
                return Err(CapError::NotParentAudience {
                    signer: signer.id().to_string(),
                    audience: parent.audience,
                });
            }

            if !has_permission(&draft.permission, &parent.permission) {
                return Err(CapError::ExceedsParentPermission);
            }

            if draft.subject != parent.subject {
                return Err(CapError::SubjectMismatch {
                    expected: parent.subject,
                    found: draft.subject,
                });
            }

            tracing::debug!(
                subject = draft.subject.as_str(),
                issuer = signer.id(),
                audience = draft.audience.as_str(),
                "issuing delegated capability"
            );
        }

        let payload = draft.into_payload(signer.id());
        Ok(zerocap_jwt::sign(signer, payload, header).await?)
    }
}
