use crate::errors::{GemchatError, GemchatResult};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// What `save` did with the supplied value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Cleared,
}

/// Persists the single Gemini API key as a raw string at a fixed path under
/// the user's config directory. At most one key exists at a time; saving an
/// empty value removes it.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn open() -> GemchatResult<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            GemchatError::StorageUnavailable("could not determine config directory".to_string())
        })?;
        Ok(Self {
            path: config_dir.join("gemchat").join("api_key"),
        })
    }

    /// Builds a store over an explicit path, used by tests.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persists a non-empty key, or removes the stored key when the value is
    /// empty. Storage failures surface for the caller to downgrade into a
    /// banner message.
    pub fn save(&self, value: &str) -> GemchatResult<SaveOutcome> {
        let value = value.trim();
        if value.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(GemchatError::StorageUnavailable(format!(
                        "failed to clear stored key: {e}"
                    )))
                }
            }
            return Ok(SaveOutcome::Cleared);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GemchatError::StorageUnavailable(format!("failed to create key directory: {e}"))
            })?;
        }
        fs::write(&self.path, value).map_err(|e| {
            GemchatError::StorageUnavailable(format!("failed to write key file: {e}"))
        })?;
        Ok(SaveOutcome::Saved)
    }

    /// Returns the stored key, or `None` when absent. Never errors: an
    /// unreadable store logs a warning and behaves as empty.
    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let key = contents.trim().to_string();
                if key.is_empty() {
                    None
                } else {
                    Some(key)
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("unable to read stored API key: {e}");
                None
            }
        }
    }

    pub fn clear(&self) -> GemchatResult<SaveOutcome> {
        self.save("")
    }
}
