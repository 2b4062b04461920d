//! Identity provider client
//!
//! The portal does not own accounts or sessions. It resolves the browser's
//! access token into a [`User`] by asking a Supabase-compatible auth API,
//! and delegates sign-out to the same API.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// User model
// =============================================================================

/// The fields of the provider's metadata bag that the portal reads.
///
/// Upstream the bag is untyped; anything with an unexpected shape reads as
/// absent instead of failing the whole user record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserMetadata {
    pub name: Option<String>,
    pub registration_number: Option<String>,
    /// Only a JSON boolean counts; `"true"` or `1` read as `None`
    pub admin: Option<bool>,
}

impl UserMetadata {
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: value.get("name").and_then(text_field),
            registration_number: value.get("registration_number").and_then(text_field),
            admin: value.get("admin").and_then(Value::as_bool),
        }
    }
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_metadata<'de, D>(deserializer: D) -> Result<UserMetadata, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(UserMetadata::from_value(&value))
}

/// Authenticated user as returned by `GET /auth/v1/user`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_metadata")]
    pub user_metadata: UserMetadata,
}

impl User {
    /// Display name, blank when the provider has none
    pub fn display_name(&self) -> &str {
        self.user_metadata.name.as_deref().unwrap_or("")
    }

    /// Registration number, blank when the provider has none
    pub fn registration_number(&self) -> &str {
        self.user_metadata
            .registration_number
            .as_deref()
            .unwrap_or("")
    }

    /// True only when the admin flag is exactly boolean `true`
    pub fn is_admin(&self) -> bool {
        self.user_metadata.admin == Some(true)
    }
}

// =============================================================================
// Provider
// =============================================================================

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity provider returned status {0}")]
    Status(u16),

    #[error("failed to decode user record: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Session accessor backed by an external identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve an access token into the current user.
    ///
    /// `Ok(None)` means there is no valid session for this token.
    async fn current_user(&self, access_token: &str) -> Result<Option<User>, IdentityError>;

    /// Revoke the session behind an access token
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;
}

/// Supabase GoTrue client
pub struct SupabaseIdentity {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
}

impl SupabaseIdentity {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        tracing::info!(base_url = %base_url, "Identity provider client initialized");

        Self {
            base_url,
            anon_key: anon_key.into(),
            client,
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn current_user(&self, access_token: &str) -> Result<Option<User>, IdentityError> {
        if access_token.trim().is_empty() {
            return Ok(None);
        }

        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            tracing::debug!(status = %status, "Identity provider rejected access token");
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!(status = %status, "Unexpected status from identity provider");
            return Err(IdentityError::Status(status.as_u16()));
        }

        let user: User = response.json().await.map_err(IdentityError::Decode)?;
        tracing::debug!(user = %user.id, "Resolved session user");

        Ok(Some(user))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        // 401 means the session is already gone
        if status.is_success() || status == reqwest::StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(IdentityError::Status(status.as_u16()))
        }
    }
}
