use serde::{Deserialize, Serialize};

/// Image submitted for disease classification, as a base64 data URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRequest {
    pub image: String,
}

impl ScanRequest {
    /// Wraps already base64-encoded bytes in a data URL of the given MIME type.
    pub fn from_base64(mime: &str, encoded: &str) -> Self {
        Self {
            image: format!("data:{mime};base64,{encoded}"),
        }
    }
}
