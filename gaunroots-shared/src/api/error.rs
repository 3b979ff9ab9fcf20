use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// The single failure type every gateway operation reports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS, connection, CORS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `message` is the
    /// server-supplied text when there was one, otherwise the operation's
    /// fallback literal.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// A success response whose body was not JSON.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of a rejected call.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Decode(_) | Self::InvalidBaseUrl(_) => None,
        }
    }

    /// Text suitable for a user-facing notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            Self::Decode(_) => "The server sent an unexpected response.".to_string(),
            Self::InvalidBaseUrl(_) => "The application is misconfigured.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_its_message() {
        let err = ApiError::rejected(StatusCode::BAD_REQUEST, "name taken");
        assert_eq!(err.to_string(), "name taken");
        assert_eq!(err.user_message(), "name taken");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn decode_errors_have_no_status() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::from(source);
        assert!(err.status().is_none());
        assert!(err.to_string().starts_with("unexpected response body"));
    }

    #[test]
    fn invalid_base_url_message() {
        let err = ApiError::InvalidBaseUrl("mailto:x".into());
        assert_eq!(err.to_string(), "invalid API base URL: mailto:x");
        assert_eq!(err.user_message(), "The application is misconfigured.");
    }
}
