//! Persisted credential store.
//!
//! The token and the user travel together as one `CredentialRecord`,
//! encoded as a single JSON document and written in one store write. A
//! reader therefore sees either the previous record or the new one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::user::SessionUser;

/// Everything needed to restore a session after a restart.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Opaque bearer token.
    pub token: String,
    /// The session user as last persisted.
    pub user: SessionUser,
}

impl CredentialRecord {
    #[must_use]
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Encodes the record for storage.
    pub fn encode(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(|e| StoreError::Write {
            details: e.to_string(),
        })
    }

    /// Decodes a stored record.
    pub fn decode(raw: &str) -> Result<Self, StoreError> {
        serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
            details: e.to_string(),
        })
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Key/value slot holding the encoded record.
///
/// Implementations store opaque strings; decoding is the session manager's
/// job so a corrupt value can be detected and cleared.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored value, or `None` if nothing is stored.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the stored value.
    fn write(&self, value: &str) -> Result<(), StoreError>;

    /// Removes the stored value. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store, used by tests and embedders without persistence.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value`.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(value.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, String> {
        self.slot
            .lock()
            .map_err(|_| "memory store lock poisoned".to_string())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        let slot = self.lock().map_err(|details| StoreError::Read { details })?;
        Ok(slot.clone())
    }

    fn write(&self, value: &str) -> Result<(), StoreError> {
        let mut slot = self.lock().map_err(|details| StoreError::Write { details })?;
        *slot = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.lock().map_err(|details| StoreError::Clear { details })?;
        *slot = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileCredentialStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use tempfile::NamedTempFile;

    use super::CredentialStore;
    use crate::error::StoreError;

    /// Store backed by a single file.
    ///
    /// Writes go to a temporary file in the same directory which is then
    /// renamed over the target.
    #[derive(Debug, Clone)]
    pub struct FileCredentialStore {
        path: PathBuf,
    }

    impl FileCredentialStore {
        #[must_use]
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn directory(&self) -> &Path {
            match self.path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            }
        }
    }

    impl CredentialStore for FileCredentialStore {
        fn read(&self) -> Result<Option<String>, StoreError> {
            match std::fs::read_to_string(&self.path) {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StoreError::Read {
                    details: format!("{}: {e}", self.path.display()),
                }),
            }
        }

        fn write(&self, value: &str) -> Result<(), StoreError> {
            let write_error = |e: std::io::Error| StoreError::Write {
                details: format!("{}: {e}", self.path.display()),
            };

            let mut staged = NamedTempFile::new_in(self.directory()).map_err(write_error)?;
            staged.write_all(value.as_bytes()).map_err(write_error)?;
            staged.as_file().sync_all().map_err(write_error)?;
            staged
                .persist(&self.path)
                .map_err(|e| write_error(e.error))?;
            Ok(())
        }

        fn clear(&self) -> Result<(), StoreError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StoreError::Clear {
                    details: format!("{}: {e}", self.path.display()),
                }),
            }
        }
    }
}
