//! Fakes and stub servers shared by unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::auth::identity::{IdentityError, IdentityProvider, User};
use crate::config::Config;
use crate::contact::{ContactRelay, ContactSubmission, RelayError, RelayReply};

/// Build a user whose metadata bag is `metadata`, as the provider would send it
pub fn user_with_metadata(metadata: serde_json::Value) -> User {
    serde_json::from_value(json!({
        "id": "user-1",
        "email": "ada@example.com",
        "user_metadata": metadata,
    }))
    .unwrap()
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "SUPABASE_URL" => Some("http://identity.localhost".to_string()),
        "SUPABASE_ANON_KEY" => Some("anon".to_string()),
        "WEB3FORMS_ACCESS_KEY" => Some("test-key".to_string()),
        _ => None,
    })
    .unwrap()
}

/// In-memory identity provider keyed by access token
#[derive(Default)]
pub struct FakeIdentity {
    users: HashMap<String, User>,
    fail: bool,
    lookups: AtomicUsize,
    signed_out: Mutex<Vec<String>>,
}

impl FakeIdentity {
    pub fn with_user(token: &str, user: User) -> Self {
        let mut identity = Self::default();
        identity.users.insert(token.to_string(), user);
        identity
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn current_user(&self, access_token: &str) -> Result<Option<User>, IdentityError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(IdentityError::Status(503));
        }
        Ok(self.users.get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }
}

/// Relay that answers every submission with a fixed result
pub struct FakeRelay {
    reply: Result<RelayReply, RelayError>,
    received: Mutex<Vec<ContactSubmission>>,
}

impl FakeRelay {
    pub fn replying(reply: Result<RelayReply, RelayError>) -> Self {
        Self {
            reply,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<ContactSubmission> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactRelay for FakeRelay {
    async fn submit(&self, submission: &ContactSubmission) -> Result<RelayReply, RelayError> {
        self.received.lock().unwrap().push(submission.clone());
        self.reply.clone()
    }
}

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
