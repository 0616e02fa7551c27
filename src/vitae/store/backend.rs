use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw keyed storage.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while DocumentStore handles the "what" (serialization, load policy).
pub trait StorageBackend {
    /// Read the raw string stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `data` under `key`, replacing any previous value.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, data: &str) -> Result<()>;

    /// Remove whatever is stored under `key`. Removing a missing key is fine.
    fn remove(&self, key: &str) -> Result<()>;

    /// The "file path" of a key. Virtual for in-memory backends.
    fn path_for(&self, key: &str) -> PathBuf;
}
