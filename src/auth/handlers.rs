//! Authentication handlers
//!
//! Sign-in happens at the identity provider. The portal only offers
//! sign-out, which it delegates to the provider before dropping the cookie.

use axum::{
    extract::State,
    http::{header::InvalidHeaderValue, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;

use super::helpers::{clear_session_cookie, extract_cookie};

/// Create a HeaderValue from a string, returning an error response if invalid.
fn header_value(s: &str) -> Result<HeaderValue, Box<Response>> {
    HeaderValue::from_str(s).map_err(|e: InvalidHeaderValue| {
        tracing::error!(
            error = %e,
            value_len = s.len(),
            "Failed to create header value"
        );
        Box::new(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Internal error setting response headers"})),
            )
                .into_response(),
        )
    })
}

/// Logout handler - revokes the provider session, clears the cookie, returns to `/`
///
/// Provider failures are logged and otherwise ignored: the local cookie is
/// always removed.
pub async fn logout_handler(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    match extract_cookie(&headers, &state.config.session_cookie).filter(|t| !t.is_empty()) {
        Some(token) => match state.identity.sign_out(&token).await {
            Ok(()) => tracing::info!("Session revoked at identity provider"),
            Err(e) => tracing::warn!(error = %e, "Identity provider sign-out failed"),
        },
        None => tracing::debug!("Logout without session cookie"),
    }

    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(
        axum::http::header::SET_COOKIE,
        header_value(&clear_session_cookie(&state.config)).map_err(|e| *e)?,
    );

    Ok(response)
}
