//! Contact form workflow
//!
//! ## Structure
//!
//! - `relay`: the outbound form relay (Web3Forms) behind the `ContactRelay` trait
//! - `guard`: per-user single-slot guard against overlapping submissions
//!
//! A submission goes Idle -> Submitting -> (Succeeded | Rejected | Failed)
//! and back to Idle. Every failure ends up as a line of result text; nothing
//! is propagated to the HTTP layer.

pub mod guard;
pub mod relay;

pub use guard::{SubmitGuard, SubmitPermit};
pub use relay::{ContactRelay, RelayError, RelayReply, Web3FormsRelay};

use serde::Deserialize;

use crate::auth::identity::User;

/// Result text while a submission is outstanding
pub const SENDING_TEXT: &str = "Sending...";
pub const SUCCESS_TEXT: &str = "✅ Form Submitted Successfully!";
pub const REJECTED_FALLBACK: &str = "Submission failed.";
pub const UNKNOWN_ERROR_TEXT: &str = "⚠️ An unknown error occurred.";
pub const ALREADY_SUBMITTING_TEXT: &str = "⏳ A submission is already in progress.";
pub const INVALID_TEXT: &str = "❌ Phone number and message are required.";

/// Editable fields posted by the browser.
///
/// The read-only `name` and `registered_number` inputs are posted too but are
/// deliberately not captured here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Both required fields are non-blank
    pub fn is_complete(&self) -> bool {
        !self.phone.trim().is_empty() && !self.message.trim().is_empty()
    }
}

/// One contact request as sent to the relay
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub phone: String,
    pub registered_number: String,
    pub message: String,
}

impl ContactSubmission {
    /// Identity fields always come from the session user, never the form
    pub fn new(user: &User, form: &ContactForm) -> Self {
        Self {
            name: user.display_name().to_string(),
            phone: form.phone.clone(),
            registered_number: user.registration_number().to_string(),
            message: form.message.clone(),
        }
    }
}

/// How a submit attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded,
    /// Relay answered `success: false`
    Rejected { reason: Option<String> },
    /// No usable answer from the relay
    Failed(RelayError),
    /// Another submission from the same user is still in flight
    AlreadySubmitting,
    /// A required field was blank
    Invalid,
}

impl SubmissionOutcome {
    pub fn from_reply(reply: RelayReply) -> Self {
        if reply.success {
            Self::Succeeded
        } else {
            Self::Rejected {
                reason: reply.message.filter(|m| !m.is_empty()),
            }
        }
    }

    /// The single feedback line shown under the form
    pub fn result_text(&self) -> String {
        match self {
            Self::Succeeded => SUCCESS_TEXT.to_string(),
            Self::Rejected { reason } => {
                format!("❌ {}", reason.as_deref().unwrap_or(REJECTED_FALLBACK))
            }
            Self::Failed(err) => match err.message() {
                Some(msg) => format!("⚠️ Error: {}", msg),
                None => UNKNOWN_ERROR_TEXT.to_string(),
            },
            Self::AlreadySubmitting => ALREADY_SUBMITTING_TEXT.to_string(),
            Self::Invalid => INVALID_TEXT.to_string(),
        }
    }

    /// Only a successful submission resets the editable fields
    pub fn clears_form(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Rejected { .. } => "rejected",
            Self::Failed(_) => "failed",
            Self::AlreadySubmitting => "already_submitting",
            Self::Invalid => "invalid",
        }
    }
}

/// Run one contact submission for `user`.
///
/// Holds the user's slot in `guard` for the duration of the relay call and
/// makes at most one relay request. No retry.
pub async fn submit_contact(
    relay: &dyn ContactRelay,
    guard: &SubmitGuard,
    user: &User,
    form: &ContactForm,
) -> SubmissionOutcome {
    if !form.is_complete() {
        tracing::debug!(user = %user.id, "Contact form missing required fields");
        return SubmissionOutcome::Invalid;
    }

    let Some(_permit) = guard.try_acquire(&user.id) else {
        tracing::info!(user = %user.id, "Contact submission rejected, one already in flight");
        return SubmissionOutcome::AlreadySubmitting;
    };

    let submission = ContactSubmission::new(user, form);
    let outcome = match relay.submit(&submission).await {
        Ok(reply) => SubmissionOutcome::from_reply(reply),
        Err(err) => SubmissionOutcome::Failed(err),
    };

    match &outcome {
        SubmissionOutcome::Failed(err) => tracing::warn!(
            user = %user.id,
            error = %err,
            "Contact submission failed"
        ),
        _ => tracing::info!(
            user = %user.id,
            outcome = outcome.kind(),
            "Contact submission finished"
        ),
    }

    outcome
}
