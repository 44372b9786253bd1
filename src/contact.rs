use dioxus::prelude::*;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::config::RuntimeConfig;
use crate::error::SubmitError;
use crate::models::{ContactErrorBody, ContactSubmission};

const SUBMIT_LABEL: &str = "Send Message";
const BUSY_LABEL: &str = "Sending...";
const SUCCESS_MESSAGE: &str = "Message sent successfully! I will get back to you soon.";
const MESSAGE_HIDE_DELAY_MS: u32 = 5000;
const CSRF_HEADER: &str = "X-CSRFToken";
#[cfg(target_arch = "wasm32")]
const CSRF_FIELD_SELECTOR: &str = "[name=csrfmiddlewaretoken]";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Contact form status: `Idle -> Submitting -> {Success, Error} -> Idle`.
///
/// Each submission gets an id so that the success auto-hide of an older
/// submission never touches a newer one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormStatus {
    state: SubmitState,
    submission: u64,
}

impl FormStatus {
    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Returns `None` while a submission is already in flight.
    pub fn begin(&mut self) -> Option<u64> {
        if self.state == SubmitState::Submitting {
            return None;
        }
        self.submission += 1;
        self.state = SubmitState::Submitting;
        Some(self.submission)
    }

    pub fn finish(&mut self, submission: u64, result: Result<(), SubmitError>) -> bool {
        if submission != self.submission || self.state != SubmitState::Submitting {
            return false;
        }
        self.state = match result {
            Ok(()) => SubmitState::Success,
            Err(err) => SubmitState::Error(err.user_message()),
        };
        true
    }

    pub fn hide(&mut self, submission: u64) -> bool {
        if submission != self.submission || self.state != SubmitState::Success {
            return false;
        }
        self.state = SubmitState::Idle;
        true
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            SubmitState::Submitting => BUSY_LABEL,
            _ => SUBMIT_LABEL,
        }
    }

    pub fn button_disabled(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// CSS class and text of the inline status message, if one is visible.
    pub fn message(&self) -> Option<(&'static str, String)> {
        match &self.state {
            SubmitState::Success => Some(("form-message success", SUCCESS_MESSAGE.to_string())),
            SubmitState::Error(message) => Some(("form-message error", message.clone())),
            SubmitState::Idle | SubmitState::Submitting => None,
        }
    }
}

pub async fn submit_contact(
    url: &str,
    submission: &ContactSubmission,
    csrf_token: Option<String>,
) -> Result<(), SubmitError> {
    let mut request = Request::post(url).header("Content-Type", "application/json");
    if let Some(token) = csrf_token {
        request = request.header(CSRF_HEADER, &token);
    }
    let response = request
        .json(submission)
        .map_err(|err| SubmitError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| SubmitError::Network(err.to_string()))?;

    if response.ok() {
        return Ok(());
    }
    let body = response.json::<ContactErrorBody>().await.ok();
    Err(SubmitError::rejected(body.and_then(|body| body.error)))
}

fn normalize_token(value: Option<String>) -> Option<String> {
    value
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn find_csrf_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let field = document.query_selector(CSRF_FIELD_SELECTOR).ok()??;
    let input = field.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    normalize_token(Some(input.value()))
}

#[cfg(not(target_arch = "wasm32"))]
fn find_csrf_token() -> Option<String> {
    None
}

#[component]
pub fn ContactForm() -> Element {
    let config = use_context::<RuntimeConfig>();
    let endpoint = config.contact_endpoint.clone();
    let mut fields = use_signal(ContactSubmission::default);
    let mut status = use_signal(FormStatus::default);

    let current = status();
    let label = current.button_label();
    let disabled = current.button_disabled();
    let (message_class, message_text) = current
        .message()
        .unwrap_or(("form-message", String::new()));
    let message_style = if message_text.is_empty() { "display: none" } else { "" };

    rsx! {
        form {
            id: "contact-form",
            class: "contact-form",
            onsubmit: move |event| {
                event.prevent_default();
                let Some(submission_id) = status.write().begin() else {
                    return;
                };
                tracing::debug!("contact: submitting");
                let payload = fields();
                let endpoint = endpoint.clone();
                spawn(async move {
                    let token = find_csrf_token();
                    let result = submit_contact(&endpoint, &payload, token).await;
                    if let Err(err) = &result {
                        tracing::error!("Error submitting form: {err}");
                    }
                    let succeeded = result.is_ok();
                    if !status.write().finish(submission_id, result) {
                        return;
                    }
                    if !succeeded {
                        return;
                    }
                    fields.set(ContactSubmission::default());
                    TimeoutFuture::new(MESSAGE_HIDE_DELAY_MS).await;
                    status.write().hide(submission_id);
                });
            },
            div { class: "{message_class}", style: "{message_style}", "{message_text}" }
            div { class: "form-group",
                label { r#for: "name", "Name" }
                input {
                    id: "name",
                    name: "name",
                    r#type: "text",
                    required: true,
                    value: "{fields().name}",
                    oninput: move |event| fields.write().name = event.value(),
                }
            }
            div { class: "form-group",
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    name: "email",
                    r#type: "email",
                    required: true,
                    value: "{fields().email}",
                    oninput: move |event| fields.write().email = event.value(),
                }
            }
            div { class: "form-group",
                label { r#for: "message", "Message" }
                textarea {
                    id: "message",
                    name: "message",
                    rows: "6",
                    required: true,
                    value: "{fields().message}",
                    oninput: move |event| fields.write().message = event.value(),
                }
            }
            button { r#type: "submit", class: "btn", disabled: disabled, "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GENERIC_FAILURE_MESSAGE, NETWORK_FAILURE_MESSAGE};
    use pretty_assertions::assert_eq;

    #[test]
    fn submitting_disables_and_relabels_button() {
        let mut status = FormStatus::default();
        assert_eq!(status.button_label(), "Send Message");
        status.begin().unwrap();
        assert_eq!(status.button_label(), "Sending...");
        assert!(status.button_disabled());
    }

    #[test]
    fn double_submit_is_ignored_while_in_flight() {
        let mut status = FormStatus::default();
        assert_eq!(status.begin(), Some(1));
        assert_eq!(status.begin(), None);
    }

    #[test]
    fn server_error_restores_original_label() {
        let mut status = FormStatus::default();
        let id = status.begin().unwrap();
        assert!(status.finish(id, Err(SubmitError::rejected(None))));
        assert_eq!(status.button_label(), "Send Message");
        assert!(!status.button_disabled());
        assert_eq!(
            status.message(),
            Some(("form-message error", GENERIC_FAILURE_MESSAGE.to_string())),
        );
    }

    #[test]
    fn network_error_shows_connection_message() {
        let mut status = FormStatus::default();
        let id = status.begin().unwrap();
        status.finish(id, Err(SubmitError::Network("offline".into())));
        assert_eq!(status.state(), &SubmitState::Error(NETWORK_FAILURE_MESSAGE.to_string()));
    }

    #[test]
    fn success_message_hides_for_its_own_submission_only() {
        let mut status = FormStatus::default();
        let first = status.begin().unwrap();
        status.finish(first, Ok(()));
        assert_eq!(status.message().unwrap().0, "form-message success");

        let second = status.begin().unwrap();
        status.finish(second, Ok(()));
        assert!(!status.hide(first));
        assert_eq!(status.state(), &SubmitState::Success);

        assert!(status.hide(second));
        assert_eq!(status.state(), &SubmitState::Idle);
        assert_eq!(status.message(), None);
    }

    #[test]
    fn error_state_allows_resubmission() {
        let mut status = FormStatus::default();
        let id = status.begin().unwrap();
        status.finish(id, Err(SubmitError::rejected(Some("Invalid JSON format".into()))));
        assert_eq!(status.begin(), Some(2));
    }

    #[test]
    fn blank_csrf_token_is_not_sent() {
        assert_eq!(normalize_token(Some("  ".into())), None);
        assert_eq!(normalize_token(Some("abc".into())), Some("abc".to_string()));
        assert_eq!(normalize_token(None), None);
    }
}
