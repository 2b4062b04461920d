use crate::auth::identity::User;
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub sign_in_url: Option<String>,
}

/// Welcome page with the profile header and contact form
#[derive(Template)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate {
    pub name: String,
    pub registration_number: String,
    pub phone: String,
    pub message: String,
    pub result: String,
    pub submitting: bool,
}

impl WelcomeTemplate {
    /// Fresh form for `user`; read-only fields mirror the user's metadata
    pub fn for_user(user: &User) -> Self {
        Self {
            name: user.display_name().to_string(),
            registration_number: user.registration_number().to_string(),
            phone: String::new(),
            message: String::new(),
            result: String::new(),
            submitting: false,
        }
    }
}

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub name: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "access_denied.html")]
pub struct AccessDeniedTemplate {
    pub message: String,
}

/// Render a template into an HTML response, 500 on render failure
pub fn render_page<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}
