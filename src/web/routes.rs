use super::handlers::{
    admin_handler, contact_submit_handler, healthz_handler, landing_handler, welcome_handler,
};
use crate::{auth::logout_handler, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/healthz", get(healthz_handler))
        .route("/welcome", get(welcome_handler))
        .route("/welcome/contact", post(contact_submit_handler))
        .route("/admin", get(admin_handler))
        .route("/auth/logout", post(logout_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}
