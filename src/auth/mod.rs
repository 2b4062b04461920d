//! Authentication and authorization module
//!
//! ## Structure
//!
//! - `identity`: typed user record and the identity provider client
//! - `admin`: admin guard (`is_admin`, `check_admin_access`)
//! - `extractors`: Axum extractors for authenticated and admin users
//! - `helpers`: Pure helper functions (cookie extraction, HTTP clients)
//! - `handlers`: HTTP handler for sign-out
//!
//! ## Session Flow
//!
//! 1. The identity provider's sign-in flow leaves an access token cookie
//! 2. Each page request resolves that token into a `User` via the provider
//! 3. Admin routes additionally pass `check_admin_access`
//! 4. `POST /auth/logout` revokes the session and clears the cookie

pub mod admin;
pub mod extractors;
pub mod handlers;
pub mod helpers;
pub mod identity;

pub use admin::{check_admin_access, is_admin, AuthzError, ADMIN_REQUIRED_MESSAGE};
pub use handlers::logout_handler;
pub use helpers::{clear_session_cookie, create_http_client, create_relay_client, extract_cookie};
pub use identity::{IdentityError, IdentityProvider, SupabaseIdentity, User, UserMetadata};
