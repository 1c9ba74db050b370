use crate::{
    assert_non_expired, has_permission, CapError, CapResult, CapabilityVerifier, Permission,
    RequestPayload,
};

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CapabilityVerifier {
    /// Checks that `request` grants `permission` at `at`.
    ///
    /// The request itself must not be expired. A self-issued request is checked against its own
    /// permission. Any other request must carry the chain it was delegated through; the chain is
    /// verified up to the subject's root capability and `permission` is checked against the leaf
    /// of the chain.
    pub async fn check_capability(
        &self,
        permission: &Permission,
        request: &RequestPayload,
        at: u64,
    ) -> CapResult<()> {
        assert_non_expired(request, at)?;

        let granted = if request.is_root() {
            request.permission.clone()
        } else {
            let ancestors = self
                .check_delegation_chain(&request.capability, &request.cap, at)
                .await?;

            let leaf = ancestors.into_iter().next().ok_or_else(|| {
                CapError::IssuerNotSubject {
                    issuer: request.issuer.clone(),
                    subject: request.subject.clone(),
                }
            })?;

            leaf.payload.permission
        };

        if !has_permission(permission, &granted) {
            tracing::debug!(%permission, %granted, subject = request.subject(), "permission denied");
            return Err(CapError::PermissionDenied(format!(
                "{permission} is not granted by {granted}"
            )));
        }

        tracing::debug!(%permission, subject = request.subject(), "permission granted");

        Ok(())
    }

    /// [`check_capability`][Self::check_capability] at the current time.
    pub async fn check_capability_now(
        &self,
        permission: &Permission,
        request: &RequestPayload,
    ) -> CapResult<()> {
        self.check_capability(permission, request, crate::now())
            .await
    }
}
