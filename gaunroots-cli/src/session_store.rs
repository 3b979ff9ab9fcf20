//! File-backed session slot for the command line.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use shared::{
    SessionError, SessionRecord, SessionRepository,
    session::decode_record,
};

/// Keeps the current user as a JSON file, readable only by its owner.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/gaunroots/session.json`, or the working directory when
    /// the platform has no config dir.
    pub fn default_path() -> PathBuf {
        BaseDirs::new().map_or_else(
            || PathBuf::from("./gaunroots-session.json"),
            |dirs| dirs.config_dir().join("gaunroots").join("session.json"),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, err: &io::Error) -> SessionError {
        SessionError::Storage(format!("{}: {err}", self.path.display()))
    }
}

impl SessionRepository for FileSessionStore {
    fn current_user(&self) -> Option<SessionRecord> {
        let raw = fs::read_to_string(&self.path).ok()?;
        decode_record(&raw)
    }

    fn set_current_user(&self, record: &SessionRecord) -> Result<(), SessionError> {
        let serialized = serde_json::to_string_pretty(record)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.storage_error(&err))?;
        }
        fs::write(&self.path, serialized).map_err(|err| self.storage_error(&err))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|err| self.storage_error(&err))?;
        }
        Ok(())
    }

    fn clear_current_user(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.storage_error(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::UserKind;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("nested").join("session.json"))
    }

    #[test]
    fn test_round_trip_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let record = SessionRecord::new(1, "Bina", UserKind::Seller);

        store.set_current_user(&record).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.current_user(), Some(record));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .set_current_user(&SessionRecord::new(2, "Hari", UserKind::Buyer))
            .unwrap();

        store.clear_current_user().unwrap();
        store.clear_current_user().unwrap();

        assert_eq!(store.current_user(), None);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_malformed_file_reads_as_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        fs::write(store.path(), "{\"id\": 1, \"name\":").unwrap();

        assert_eq!(store.current_user(), None);
        assert!(store.path().exists(), "unreadable value is left in place");
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .set_current_user(&SessionRecord::new(3, "Gita", UserKind::Buyer))
            .unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
