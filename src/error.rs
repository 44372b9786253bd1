use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Failure while loading projects or skills. Logged, never shown.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("http {0}")]
    Status(u16),
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Failure while posting the contact form. Shown inline next to the form.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SubmitError {
    #[error("submission rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
    #[error("request failed: {0}")]
    Network(String),
}

impl SubmitError {
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self::Rejected(message)
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(Some(message)) => message.clone(),
            Self::Rejected(None) => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn server_message_wins_over_generic_text() {
        let error = SubmitError::rejected(Some("Invalid JSON format".into()));
        assert_eq!(error.user_message(), "Invalid JSON format");
    }

    #[test]
    fn blank_server_message_falls_back() {
        assert_eq!(
            SubmitError::rejected(Some("   ".into())).user_message(),
            GENERIC_FAILURE_MESSAGE,
        );
        assert_eq!(SubmitError::rejected(None).user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn network_failure_hides_transport_detail() {
        let error = SubmitError::Network("TypeError: Failed to fetch".into());
        assert_eq!(error.user_message(), NETWORK_FAILURE_MESSAGE);
    }
}
