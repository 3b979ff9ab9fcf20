use serde::Deserialize;
use serde_json::Value;

/// Error payload returned by the backend on a non-success status.
///
/// The backend reports failures as `{"detail": "..."}`; a few endpoints use
/// `message` instead. Validation failures carry a structured `detail`, which
/// is not a user-facing string and is therefore ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parses a raw response body; anything that is not a JSON object yields `None`.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    /// The server-supplied message, if the body carries one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .or(self.message.as_deref())
            .filter(|message| !message.trim().is_empty())
    }
}
