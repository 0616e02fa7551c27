use super::backend::StorageBackend;
use super::{DataStore, DEFAULT_STORAGE_KEY};
use crate::error::{Result, VitaeError};
use crate::model::ResumeDocument;
use std::path::PathBuf;

pub struct DocumentStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    key: String,
}

impl<B: StorageBackend> DocumentStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> DataStore for DocumentStore<B> {
    fn load(&self) -> Option<ResumeDocument> {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "stored resume is unreadable; ignoring it");
                return None;
            }
        };

        match serde_json::from_str::<ResumeDocument>(&raw) {
            Ok(doc) => Some(doc),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "stored resume does not match the schema; ignoring it");
                None
            }
        }
    }

    fn save(&self, doc: &ResumeDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(doc).map_err(VitaeError::Serialization)?;
        self.backend.write(&self.key, &content)?;
        tracing::debug!(key = %self.key, bytes = content.len(), "resume saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.backend.remove(&self.key)?;
        tracing::debug!(key = %self.key, "stored resume cleared");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.backend.path_for(&self.key)
    }
}
