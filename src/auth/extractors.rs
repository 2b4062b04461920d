use crate::auth::admin::check_admin_access;
use crate::auth::helpers::extract_cookie;
use crate::auth::identity::User;
use crate::web::templates::{render_page, AccessDeniedTemplate};
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Custom authentication error type
#[derive(Debug)]
pub enum AuthError {
    Unauthenticated(String),
    Forbidden(String),
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            // Pages are browser-facing: send the user back to the landing page
            AuthError::Unauthenticated(msg) => {
                tracing::debug!(reason = %msg, "Unauthenticated request redirected to landing");
                Redirect::to("/").into_response()
            }

            AuthError::Forbidden(message) => {
                let mut response = render_page(&AccessDeniedTemplate { message });
                *response.status_mut() = StatusCode::FORBIDDEN;
                response
            }

            AuthError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": msg
                })),
            )
                .into_response(),
        }
    }
}

/// Authenticated user extractor - resolves the session cookie via the identity provider
///
/// Usage:
/// ```rust,ignore
/// async fn handler(AuthenticatedUser { user, .. }: AuthenticatedUser) {
///     println!("User: {}", user.display_name());
/// }
/// ```
pub struct AuthenticatedUser {
    pub user: User,
    pub access_token: String,
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let access_token = extract_cookie(&parts.headers, &state.config.session_cookie)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::Unauthenticated("Missing session cookie".to_string()))?;

        let user = state
            .identity
            .current_user(&access_token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to resolve session user");
                AuthError::Internal(format!("Identity provider error: {}", e))
            })?
            .ok_or_else(|| AuthError::Unauthenticated("Session not recognised".to_string()))?;

        tracing::debug!(user = %user.id, "User authenticated via cookie");

        Ok(AuthenticatedUser { user, access_token })
    }
}

/// Admin-only extractor - an authenticated user that passed `check_admin_access`
///
/// The admin check asks the identity provider again instead of reusing the
/// session lookup, so each request costs two provider round trips. Admin
/// status is never cached.
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = AuthenticatedUser::from_request_parts(parts, state).await?;

        if let Err(e) = check_admin_access(state.identity.as_ref(), &session.access_token).await {
            tracing::warn!(user = %session.user.id, "Admin access denied");
            return Err(AuthError::Forbidden(e.to_string()));
        }

        Ok(AdminUser(session))
    }
}
