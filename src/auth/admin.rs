//! Admin guard
//!
//! The admin decision is derived from the identity provider on every call.
//! Nothing here caches a role.

use thiserror::Error;

use super::identity::IdentityProvider;

/// Message carried by a failed admin check
pub const ADMIN_REQUIRED_MESSAGE: &str = "Unauthorized: Admin access required";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthzError {
    #[error("{}", ADMIN_REQUIRED_MESSAGE)]
    AdminRequired,
}

/// Check whether the session behind `access_token` belongs to an admin.
///
/// Returns `false` for no session, a missing or non-boolean flag, and for
/// identity provider failures. Never errors.
pub async fn is_admin(provider: &dyn IdentityProvider, access_token: &str) -> bool {
    match provider.current_user(access_token).await {
        Ok(Some(user)) => user.is_admin(),
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Admin check could not reach identity provider");
            false
        }
    }
}

/// Require admin access, failing with [`AuthzError::AdminRequired`] otherwise
pub async fn check_admin_access(
    provider: &dyn IdentityProvider,
    access_token: &str,
) -> Result<bool, AuthzError> {
    if !is_admin(provider, access_token).await {
        return Err(AuthzError::AdminRequired);
    }
    Ok(true)
}
