// File: rhtmx-formguard/src/submit.rs
// Purpose: Asynchronous form submission and server error reconciliation

use crate::backend::SubmitRequest;
use crate::error::FormGuardError;
use crate::session::FormSession;

/// What happened to a submit attempt
///
/// The browser's own submission is always suppressed; this is the only
/// path a form takes to the server.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Form is not valid; nothing was sent
    Blocked,
    /// Accepted; the page should navigate to this URL
    Redirect(String),
    /// Accepted without a redirect
    Completed,
    /// Rejected; this many server errors were attached to fields
    Rejected(usize),
    /// The request itself failed
    Failed(FormGuardError),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Redirect(_) | SubmitOutcome::Completed)
    }
}

impl FormSession {
    /// Submit the form if every validate-tagged field is valid
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let form = self.form.lock().await;
            if !form.form_is_valid() {
                tracing::debug!("Submit blocked: form has invalid fields");
                return SubmitOutcome::Blocked;
            }
            SubmitRequest {
                action: form.action.clone(),
                method: form.method,
                body: form.serialize(),
            }
        };

        let response = match self.backend.submit(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Submitting to {} failed: {}", request.action, e);
                return SubmitOutcome::Failed(e);
            }
        };

        if response.is_success() {
            self.form.lock().await.clear_values();
            return match response.redirect_url() {
                Some(url) => {
                    tracing::debug!("Submission accepted, redirecting to {}", url);
                    SubmitOutcome::Redirect(url.to_string())
                }
                None => SubmitOutcome::Completed,
            };
        }

        // Server messages are shown as sent, without a translation lookup
        let mut shown = 0;
        for error in response.field_errors() {
            if self.display_error(&error.field, error.message).await.is_some() {
                shown += 1;
            } else {
                tracing::warn!("Server reported an error for unknown field '{}'", error.field);
            }
        }

        tracing::debug!(
            "Submission rejected with status {} ({} field errors)",
            response.status,
            shown
        );
        SubmitOutcome::Rejected(shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MemoryBackend, SubmitResponse};
    use crate::config::Config;
    use crate::field::{FieldKind, FieldState, InputField};
    use crate::form::{Form, FormMethod};
    use serde_json::json;
    use std::sync::Arc;

    fn session(form: Form) -> (FormSession, MemoryBackend) {
        let backend = MemoryBackend::new();
        let session = FormSession::new(form, Arc::new(backend.clone()), &Config::default());
        (session, backend)
    }

    fn valid_form() -> Form {
        let mut email = InputField::new("email").validated().with_value("a@b.com");
        email.state = FieldState::Valid;
        Form::new("/signup", FormMethod::Post)
            .with_field(email)
            .with_field(InputField::new("bio").with_kind(FieldKind::TextArea).with_value("hi"))
    }

    #[tokio::test]
    async fn test_invalid_form_is_blocked() {
        let (session, backend) = session(
            Form::new("/signup", FormMethod::Post).with_field(InputField::new("email").validated()),
        );

        assert!(matches!(session.submit().await, SubmitOutcome::Blocked));
        assert!(backend.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_success_without_redirect_clears_values() {
        let (session, backend) = session(valid_form());

        let outcome = session.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Completed));
        assert!(outcome.is_accepted());

        let sent = backend.submissions().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "email=a%40b.com&bio=hi");

        let form = session.snapshot().await;
        assert_eq!(form.field("email").unwrap().value, "");
        assert_eq!(form.field("bio").unwrap().value, "");
    }

    #[tokio::test]
    async fn test_rejection_without_error_list() {
        let (session, backend) = session(valid_form());
        backend.respond_with(SubmitResponse::new(500, serde_json::Value::Null)).await;

        assert!(matches!(session.submit().await, SubmitOutcome::Rejected(0)));
        assert_eq!(session.snapshot().await.field("bio").unwrap().value, "hi");
    }

    #[tokio::test]
    async fn test_unknown_error_fields_are_skipped() {
        let (session, backend) = session(valid_form());
        backend
            .respond_with(SubmitResponse::new(
                400,
                json!({ "errors": [
                    { "field": "ghost", "message": "nope" },
                    { "field": "bio", "message": "too short" }
                ]}),
            ))
            .await;

        assert!(matches!(session.submit().await, SubmitOutcome::Rejected(1)));
        let form = session.snapshot().await;
        assert_eq!(form.messages.len(), 1);
        assert_eq!(form.messages.all()[0].text, "too short");
    }
}
