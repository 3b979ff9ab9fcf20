//! Access to the single persisted "current user" slot.
//!
//! Presence of a record is the only notion of being logged in: there is no
//! expiry and no token. Each platform supplies its own [`SessionRepository`]
//! (browser local storage, a file for the CLI, memory for tests).

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::warn;

use crate::models::SessionRecord;

/// Storage key under which the serialized session record lives.
pub const SESSION_STORAGE_KEY: &str = "currentUser";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to serialize session record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("session storage unavailable: {0}")]
    Storage(String),
}

/// Read/write/clear access to the persisted session record.
pub trait SessionRepository {
    /// The stored record, or `None` when absent or unreadable.
    fn current_user(&self) -> Option<SessionRecord>;

    /// Persists `record`, replacing any previous value.
    ///
    /// # Errors
    /// Fails when the record cannot be serialized or the backing store rejects the write.
    fn set_current_user(&self, record: &SessionRecord) -> Result<(), SessionError>;

    /// Removes the stored record. Clearing an absent session succeeds.
    ///
    /// # Errors
    /// Fails only when the backing store rejects the removal.
    fn clear_current_user(&self) -> Result<(), SessionError>;

    fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Decodes a stored value, treating corrupt JSON as "no session".
#[must_use]
pub fn decode_record(raw: &str) -> Option<SessionRecord> {
    match serde_json::from_str(raw) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(error = %err, "ignoring malformed session record");
            None
        }
    }
}

/// In-memory repository holding the serialized record, like a storage slot would.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with a raw stored value, bypassing serialization.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, SessionError> {
        self.slot
            .lock()
            .map_err(|_| SessionError::Storage("session slot poisoned".to_string()))
    }
}

impl SessionRepository for MemorySessionStore {
    fn current_user(&self) -> Option<SessionRecord> {
        let guard = self.lock().ok()?;
        guard.as_deref().and_then(decode_record)
    }

    fn set_current_user(&self, record: &SessionRecord) -> Result<(), SessionError> {
        let raw = serde_json::to_string(record)?;
        *self.lock()? = Some(raw);
        Ok(())
    }

    fn clear_current_user(&self) -> Result<(), SessionError> {
        *self.lock()? = None;
        Ok(())
    }
}

impl<T: SessionRepository + ?Sized> SessionRepository for std::rc::Rc<T> {
    fn current_user(&self) -> Option<SessionRecord> {
        (**self).current_user()
    }

    fn set_current_user(&self, record: &SessionRecord) -> Result<(), SessionError> {
        (**self).set_current_user(record)
    }

    fn clear_current_user(&self) -> Result<(), SessionError> {
        (**self).clear_current_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserKind;
    use serde_json::json;

    #[test]
    fn starts_empty() {
        let store = MemorySessionStore::new();
        assert!(store.current_user().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let store = MemorySessionStore::new();
        let mut record = SessionRecord::new(1, "Bina", UserKind::Seller);
        record.extra.insert("credits".into(), json!(12));
        record.extra.insert("friends".into(), json!(["Hari", "Gita"]));

        store.set_current_user(&record).unwrap();
        assert_eq!(store.current_user(), Some(record));
        assert!(store.is_logged_in());
    }

    #[test]
    fn set_overwrites_previous_record() {
        let store = MemorySessionStore::new();
        store
            .set_current_user(&SessionRecord::new(1, "Bina", UserKind::Seller))
            .unwrap();
        let replacement = SessionRecord::new(2, "Ram", UserKind::Buyer);
        store.set_current_user(&replacement).unwrap();
        assert_eq!(store.current_user(), Some(replacement));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemorySessionStore::new();
        store
            .set_current_user(&SessionRecord::new(1, "Bina", UserKind::Seller))
            .unwrap();
        store.clear_current_user().unwrap();
        assert!(store.current_user().is_none());
        store.clear_current_user().unwrap();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn malformed_value_reads_as_absent() {
        let store = MemorySessionStore::with_raw("{not json");
        assert!(store.current_user().is_none());

        let store = MemorySessionStore::with_raw(r#"{"id":1,"name":"Bina","type":"admin"}"#);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn clones_share_the_slot() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        store
            .set_current_user(&SessionRecord::new(3, "Gita", UserKind::Buyer))
            .unwrap();
        assert_eq!(other.current_user().map(|r| r.name), Some("Gita".to_string()));
    }
}
