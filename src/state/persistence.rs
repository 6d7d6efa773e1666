// Identity persistence module
// Handles saving, loading and clearing the signed-in user record

use super::session::User;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Version of the identity record format
const IDENTITY_FORMAT_VERSION: u32 = 1;

/// Error types for persistence operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// File I/O error
    #[error("IO Error: {0}")]
    IoError(String),
    /// JSON serialization/deserialization error
    #[error("JSON Error: {0}")]
    JsonError(String),
    /// Invalid data format
    #[error("Invalid Data: {0}")]
    InvalidData(String),
}

/// Serializable structure for the identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdentityRecord {
    /// Version of the record format (for future migration support)
    version: u32,
    /// The signed-in user
    user: User,
}

/// Storage for the single "current user" record
///
/// Written on login, removed on logout, read once at startup.
pub trait IdentityStore: Send + Sync {
    /// Read the stored identity, `Ok(None)` when nothing is stored
    fn load(&self) -> Result<Option<User>, PersistenceError>;

    /// Store the identity, replacing any previous one
    fn save(&self, user: &User) -> Result<(), PersistenceError>;

    /// Remove the stored identity; removing nothing is not an error
    fn clear(&self) -> Result<(), PersistenceError>;
}

/// Identity record kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Create a store backed by the given file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<User>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json =
            fs::read_to_string(&self.path).map_err(|e| PersistenceError::IoError(e.to_string()))?;

        let record: IdentityRecord =
            serde_json::from_str(&json).map_err(|e| PersistenceError::JsonError(e.to_string()))?;

        // Validate version (for future migration support)
        if record.version != IDENTITY_FORMAT_VERSION {
            return Err(PersistenceError::InvalidData(format!(
                "Unsupported identity record version: {}",
                record.version
            )));
        }

        Ok(Some(record.user))
    }

    fn save(&self, user: &User) -> Result<(), PersistenceError> {
        let record = IdentityRecord {
            version: IDENTITY_FORMAT_VERSION,
            user: user.clone(),
        };

        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| PersistenceError::JsonError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PersistenceError::IoError(e.to_string()))?;
            }
        }

        fs::write(&self.path, json).map_err(|e| PersistenceError::IoError(e.to_string()))?;

        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::IoError(e.to_string())),
        }
    }
}

/// Identity record held in memory
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    user: Mutex<Option<User>>,
}

impl MemoryIdentityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds an identity
    pub fn with_user(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<User>>, PersistenceError> {
        self.user
            .lock()
            .map_err(|_| PersistenceError::InvalidData("identity lock poisoned".to_string()))
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<User>, PersistenceError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, user: &User) -> Result<(), PersistenceError> {
        *self.slot()? = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_identity_record_serialization() {
        let record = IdentityRecord {
            version: 1,
            user: User::from_email("a@b.com"),
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: IdentityRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.version, 1);
        assert_eq!(deserialized.user, record.user);
    }

    #[test]
    fn test_save_load_and_clear_file() {
        let dir = tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path().join("nested").join("identity.json"));
        let user = User::from_email("jane@corp.io");

        store.save(&user).unwrap();
        assert_eq!(store.load().unwrap(), Some(user));

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        // Delete the file
        drop(temp_file);

        let store = FileIdentityStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
        // Clearing a missing record is fine too
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let temp_file = NamedTempFile::new().unwrap();
        let user = User::from_email("a@b.com");
        let json = serde_json::json!({ "version": 7, "user": user });
        fs::write(temp_file.path(), json.to_string()).unwrap();

        let err = FileIdentityStore::new(temp_file.path()).load().unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidData(_)));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "not json").unwrap();

        let err = FileIdentityStore::new(temp_file.path()).load().unwrap_err();
        assert!(matches!(err, PersistenceError::JsonError(_)));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryIdentityStore::new();
        assert_eq!(store.load().unwrap(), None);

        let user = User::from_email("a@b.com");
        store.save(&user).unwrap();
        assert_eq!(store.load().unwrap(), Some(user));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
