use super::templates::{render_page, AdminTemplate, LandingTemplate, WelcomeTemplate};
use crate::auth::extractors::{AdminUser, AuthenticatedUser};
use crate::contact::{submit_contact, ContactForm, SENDING_TEXT};
use crate::AppState;
use axum::extract::{rejection::FormRejection, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Form;
use std::sync::Arc;

/// Liveness probe - always returns OK if the process is running
pub async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn landing_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    render_page(&LandingTemplate {
        sign_in_url: state.config.sign_in_url.clone(),
    })
}

/// Welcome page - profile header and an empty contact form
///
/// If a submission for this user is still in flight (e.g. from another tab)
/// the form shows the in-progress state.
pub async fn welcome_handler(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser { user, .. }: AuthenticatedUser,
) -> impl IntoResponse {
    let mut page = WelcomeTemplate::for_user(&user);
    if state.submissions.is_submitting(&user.id) {
        page.submitting = true;
        page.result = SENDING_TEXT.to_string();
    }
    render_page(&page)
}

/// Contact form submission - relays the form and re-renders the page with the result
///
/// Always answers 200 with the page; relay failures become result text. A
/// body that is not a decodable form is treated as an empty form.
pub async fn contact_submit_handler(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser { user, .. }: AuthenticatedUser,
    form: Result<Form<ContactForm>, FormRejection>,
) -> impl IntoResponse {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(user = %user.id, error = %rejection, "Undecodable contact form body");
            ContactForm::default()
        }
    };

    let outcome = submit_contact(
        state.relay.as_ref(),
        &state.submissions,
        &user,
        &form,
    )
    .await;

    let mut page = WelcomeTemplate::for_user(&user);
    page.result = outcome.result_text();
    page.submitting = state.submissions.is_submitting(&user.id);
    if !outcome.clears_form() {
        page.phone = form.phone;
        page.message = form.message;
    }
    render_page(&page)
}

/// Admin page - only reachable through the admin guard
pub async fn admin_handler(AdminUser(session): AdminUser) -> impl IntoResponse {
    render_page(&AdminTemplate {
        name: session.user.display_name().to_string(),
        email: session.user.email.clone().unwrap_or_default(),
    })
}
