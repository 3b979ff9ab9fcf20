use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::user::{RecordId, UserKind};

/// Cached copy of the last successful login or registration response.
///
/// Only `id`, `name` and `type` are understood by the client. Everything else
/// the backend sends (credits, friends, ...) is kept in `extra` and written
/// back untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionRecord {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, kind: UserKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            extra: Map::new(),
        }
    }

    /// Builds a record from a verbatim gateway response.
    ///
    /// # Errors
    /// Fails when the body lacks a usable `id`, `name` or `type`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[must_use]
    pub fn is_seller(&self) -> bool {
        self.kind == UserKind::Seller
    }

    /// Backend-assigned credit balance, when present.
    #[must_use]
    pub fn credits(&self) -> Option<i64> {
        self.extra.get("credits").and_then(Value::as_i64)
    }
}
