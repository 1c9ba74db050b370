use crate::{assert_non_expired, has_permission, CapError, CapResult, CapabilityPayload};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Checks that `child` is a valid one-hop delegation of `parent` at `at`.
///
/// The checks run in this order and the first failure is returned:
///
/// 1. `child` is issued by the audience of `parent`.
/// 2. `child` is about the same subject as `parent`.
/// 3. `parent` is not expired.
/// 4. `child` does not claim more than `parent` grants.
pub fn assert_valid_delegation(
    parent: &CapabilityPayload,
    child: &CapabilityPayload,
    at: u64,
) -> CapResult<()> {
    if child.issuer != parent.audience {
        return Err(CapError::AudienceMismatch {
            parent_audience: parent.audience.clone(),
            child_issuer: child.issuer.clone(),
        });
    }

    if child.subject != parent.subject {
        return Err(CapError::SubjectMismatch {
            expected: parent.subject.clone(),
            found: child.subject.clone(),
        });
    }

    assert_non_expired(parent, at)?;

    if !has_permission(&child.permission, &parent.permission) {
        return Err(CapError::PermissionMismatch);
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::{CapabilityBuilder, Permission};

    use super::*;

    const AT: u64 = 1_700_000_000;

    fn payload(iss: &str, sub: &str, aud: &str, permission: Permission) -> CapabilityPayload {
        CapabilityBuilder::default()
            .issuer(iss)
            .subject(sub)
            .audience(aud)
            .permission(permission)
            .build()
    }

    #[test]
    fn test_valid_delegation() -> anyhow::Result<()> {
        let parent = payload("alice", "alice", "bob", Permission::new("test/*", "foo/*"));
        let child = payload("bob", "alice", "carol", Permission::new("test/read", "foo/bar"));

        assert_valid_delegation(&parent, &child, AT)?;

        Ok(())
    }

    #[test]
    fn test_delegation_failures() {
        let parent = payload("alice", "alice", "bob", Permission::new("test/read", "foo/bar"));

        let child = payload("eve", "alice", "carol", Permission::new("test/read", "foo/bar"));
        let err = assert_valid_delegation(&parent, &child, AT).unwrap_err();
        assert!(err.to_string().contains("audience mismatch"));

        let child = payload("bob", "eve", "carol", Permission::new("test/read", "foo/bar"));
        let err = assert_valid_delegation(&parent, &child, AT).unwrap_err();
        assert!(err.to_string().contains("subject mismatch"));

        let child = payload("bob", "alice", "carol", Permission::new("test/write", "foo/bar"));
        let err = assert_valid_delegation(&parent, &child, AT).unwrap_err();
        assert!(err.to_string().contains("permission mismatch"));

        let expired = CapabilityBuilder::default()
            .issuer("alice")
            .subject("alice")
            .audience("bob")
            .permission(Permission::new("test/read", "foo/bar"))
            .expiration(AT)
            .build();
        let child = payload("bob", "alice", "carol", Permission::new("test/read", "foo/bar"));
        let err = assert_valid_delegation(&expired, &child, AT).unwrap_err();
        assert!(matches!(err, CapError::Expired { .. }));
    }

    #[test]
    fn test_delegation_check_order() {
        // Audience is checked before subject, expiry and permission.
        let parent = CapabilityBuilder::default()
            .issuer("alice")
            .subject("alice")
            .audience("bob")
            .permission(Permission::new("test/read", "foo/bar"))
            .expiration(AT - 1)
            .build();
        let child = payload("eve", "eve", "carol", Permission::new("*", "*"));

        let err = assert_valid_delegation(&parent, &child, AT).unwrap_err();
        assert!(matches!(err, CapError::AudienceMismatch { .. }));

        // Expiry is checked before permission.
        let child = payload("bob", "alice", "carol", Permission::new("*", "*"));
        let err = assert_valid_delegation(&parent, &child, AT).unwrap_err();
        assert!(matches!(err, CapError::Expired { .. }));
    }
}
