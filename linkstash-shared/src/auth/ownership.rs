/// Ownership authorization
///
/// A resource may be mutated or destroyed only by its owner. Reads and
/// creation need nothing beyond a valid authenticated identity, which the
/// presence of an [`AuthContext`] already proves.
///
/// # Example
///
/// ```
/// use linkstash_shared::auth::middleware::AuthContext;
/// use linkstash_shared::auth::ownership::{authorize, ResourceAction};
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let auth = AuthContext { user_id };
///
/// assert!(authorize(&auth, user_id, ResourceAction::Destroy).is_ok());
/// assert!(authorize(&auth, Uuid::new_v4(), ResourceAction::Destroy).is_err());
/// ```

use uuid::Uuid;

use super::middleware::AuthContext;

/// The operations a client can perform on resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAction {
    /// List the catalog
    Index,

    /// Read a single resource
    Show,

    /// Submit a new resource
    Create,

    /// Modify an existing resource
    Update,

    /// Remove an existing resource
    Destroy,
}

impl ResourceAction {
    /// Whether this action is restricted to the resource's owner
    pub fn requires_ownership(&self) -> bool {
        matches!(self, ResourceAction::Update | ResourceAction::Destroy)
    }
}

/// Error type for ownership checks
#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    /// Acting user does not own the resource
    #[error("Not the owner of this resource")]
    NotOwner,
}

/// Decides whether the acting identity may perform an action on a resource
///
/// `Update` and `Destroy` are allowed only when the acting user is the
/// resource's owner; every other action is allowed for any authenticated
/// identity.
pub fn authorize(
    auth: &AuthContext,
    resource_owner_id: Uuid,
    action: ResourceAction,
) -> Result<(), OwnershipError> {
    if action.requires_ownership() && auth.user_id != resource_owner_id {
        return Err(OwnershipError::NotOwner);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_may_mutate() {
        let user_id = Uuid::new_v4();
        let auth = AuthContext { user_id };

        assert!(authorize(&auth, user_id, ResourceAction::Update).is_ok());
        assert!(authorize(&auth, user_id, ResourceAction::Destroy).is_ok());
    }

    #[test]
    fn test_non_owner_denied_mutation() {
        let auth = AuthContext { user_id: Uuid::new_v4() };
        let owner_id = Uuid::new_v4();

        assert!(matches!(
            authorize(&auth, owner_id, ResourceAction::Update),
            Err(OwnershipError::NotOwner)
        ));
        assert!(matches!(
            authorize(&auth, owner_id, ResourceAction::Destroy),
            Err(OwnershipError::NotOwner)
        ));
    }

    #[test]
    fn test_reads_and_creation_need_no_ownership() {
        let auth = AuthContext { user_id: Uuid::new_v4() };
        let owner_id = Uuid::new_v4();

        assert!(authorize(&auth, owner_id, ResourceAction::Index).is_ok());
        assert!(authorize(&auth, owner_id, ResourceAction::Show).is_ok());
        assert!(authorize(&auth, owner_id, ResourceAction::Create).is_ok());
    }

    #[test]
    fn test_requires_ownership() {
        assert!(ResourceAction::Update.requires_ownership());
        assert!(ResourceAction::Destroy.requires_ownership());
        assert!(!ResourceAction::Index.requires_ownership());
        assert!(!ResourceAction::Show.requires_ownership());
        assert!(!ResourceAction::Create.requires_ownership());
    }
}
