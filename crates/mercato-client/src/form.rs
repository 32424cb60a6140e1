//! Submission state for simple forms (contact, order tracking).

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded { message: String },
    Failed { message: String },
    /// The session expired mid-submit; the view should redirect.
    SignInRequired { login_route: String },
}

/// Drives one form through idle → submitting → success | error.
///
/// While a submission is in flight further calls to [`FormSubmission::submit`]
/// are ignored, which is what a disabled submit button gives a browser.
#[derive(Debug)]
pub struct FormSubmission {
    state: Mutex<SubmissionState>,
}

impl Default for FormSubmission {
    fn default() -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
        }
    }
}

impl FormSubmission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `true` while the submit button should be disabled.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    pub fn reset(&self) {
        self.set(SubmissionState::Idle);
    }

    fn set(&self, next: SubmissionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Runs `send` unless a submission is already in flight, and returns the
    /// resulting state. `send` resolves to the confirmation message.
    ///
    /// If the returned future is dropped before `send` resolves, the form
    /// goes back to [`SubmissionState::Idle`].
    pub async fn submit<F, Fut>(&self, send: F) -> SubmissionState
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ClientError>>,
    {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == SubmissionState::Submitting {
                return SubmissionState::Submitting;
            }
            *state = SubmissionState::Submitting;
        }
        let guard = SubmittingGuard { form: self };

        let next = match send().await {
            Ok(message) => SubmissionState::Succeeded { message },
            Err(ClientError::Unauthorized { login_route }) => {
                SubmissionState::SignInRequired { login_route }
            }
            Err(err) => {
                tracing::warn!(error = %err, "form submission failed");
                SubmissionState::Failed {
                    message: err.user_message(),
                }
            }
        };
        self.set(next.clone());
        drop(guard);
        next
    }
}

/// Releases the busy state if the owning submit never finished.
struct SubmittingGuard<'a> {
    form: &'a FormSubmission,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self
            .form
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *state == SubmissionState::Submitting {
            *state = SubmissionState::Idle;
        }
    }
}

/// Payload for `POST /api/v1/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactRequest {
    /// Names of required fields that are blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}
