use gloo_storage::{LocalStorage, Storage, errors::StorageError};
use shared::{SESSION_STORAGE_KEY, SessionError, SessionRecord, SessionRepository};
use tracing::warn;

/// Session record kept in `localStorage`, shared by every page of the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSessionStore;

impl LocalStorageSessionStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SessionRepository for LocalStorageSessionStore {
    fn current_user(&self) -> Option<SessionRecord> {
        match LocalStorage::get::<SessionRecord>(SESSION_STORAGE_KEY) {
            Ok(record) => Some(record),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable session record");
                None
            }
        }
    }

    fn set_current_user(&self, record: &SessionRecord) -> Result<(), SessionError> {
        LocalStorage::set(SESSION_STORAGE_KEY, record)
            .map_err(|err| SessionError::Storage(err.to_string()))
    }

    fn clear_current_user(&self) -> Result<(), SessionError> {
        LocalStorage::delete(SESSION_STORAGE_KEY);
        Ok(())
    }
}
