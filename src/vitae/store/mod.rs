//! # Storage Layer
//!
//! The resume lives in exactly one serialized document under a fixed storage
//! key (`resumeData` unless configured otherwise). This module defines how that
//! document gets in and out of durable storage.
//!
//! ## Two Layers
//!
//! - [`backend::StorageBackend`]: raw keyed string I/O. Knows nothing about
//!   resumes. [`fs_backend::FsBackend`] writes `<data_dir>/<key>.json`,
//!   [`mem_backend::MemBackend`] keeps strings in memory for tests.
//! - [`doc_store::DocumentStore`]: JSON (de)serialization plus the load policy.
//!   Implements [`DataStore`], the trait the session is generic over.
//!
//! ## Load Policy
//!
//! Stored data is never trusted. Missing data, unreadable files, malformed JSON
//! and documents that do not match the current schema all load as `None`; the
//! session then falls back to the starter template. There is no migration.
//!
//! ## Write Policy
//!
//! Every successful mutation writes the **whole** document synchronously, so
//! the last edit is on disk before the process exits. Writes are atomic (temp
//! file + rename) and last-write-wins; there are no partial or delta writes.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.local/share/vitae/
//! └── resumeData.json    # The serialized ResumeDocument
//! ```

use crate::error::Result;
use crate::model::ResumeDocument;
use std::path::PathBuf;

pub mod backend;
pub mod doc_store;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use doc_store::DocumentStore;

pub const DEFAULT_STORAGE_KEY: &str = "resumeData";

pub type FileStore = DocumentStore<fs_backend::FsBackend>;

/// Durable home of the resume document.
pub trait DataStore {
    /// Load the stored document. Absent, unreadable or mismatched data is `None`.
    fn load(&self) -> Option<ResumeDocument>;

    /// Persist the complete document, replacing whatever was stored.
    fn save(&self, doc: &ResumeDocument) -> Result<()>;

    /// Forget the stored document.
    fn clear(&self) -> Result<()>;

    /// Where the document lives (a real path for file stores).
    fn location(&self) -> PathBuf;
}
