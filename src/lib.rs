//! Contact portal library
//!
//! Provides the welcome/contact page, the contact form relay, and the admin
//! guard for the portal web service.

#![deny(dead_code)]

pub mod auth;
pub mod config;
pub mod contact;
pub mod web;

#[cfg(test)]
mod test_support;

use auth::identity::IdentityProvider;
use config::Config;
use contact::{ContactRelay, SubmitGuard};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Session accessor (external identity provider)
    pub identity: Arc<dyn IdentityProvider>,
    /// Outbound form relay for contact submissions
    pub relay: Arc<dyn ContactRelay>,
    /// Per-user in-flight contact submissions
    pub submissions: Arc<SubmitGuard>,
}

impl AppState {
    pub fn new(
        config: Config,
        identity: Arc<dyn IdentityProvider>,
        relay: Arc<dyn ContactRelay>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            identity,
            relay,
            submissions: Arc::new(SubmitGuard::new()),
        }
    }
}
