//! # Vitae Architecture
//!
//! Vitae is a **UI-agnostic resume editing core**. It owns one structured resume
//! document, applies edits to it, keeps it on disk and hands it to read-only
//! consumers. The bundled CLI is just one client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (api.rs)                                     │
//! │  - Owns the live document                                   │
//! │  - mutate → persist → broadcast                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, reorder.rs)                  │
//! │  - Pure functions: document in, document out                │
//! │  - No I/O, no failures, no-ops for unresolved addresses     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait over keyed StorageBackends               │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exports ([`export`]) and observers ([`notify`]) sit beside the session and
//! only ever see `&ResumeDocument`.
//!
//! ## Identity
//!
//! Entries are addressed by [`model::EntryId`], never by position, except for
//! the explicit reorder operation. Ids come from an injected
//! [`model::IdGenerator`] so tests can use predictable sequences.
//!
//! ## Module Overview
//!
//! - [`api`]: The session facade, entry point for all operations
//! - [`commands`]: Pure mutations and the `Intent` dispatcher
//! - [`model`]: The resume document and its invariants
//! - [`store`]: Storage abstraction and implementations
//! - [`reorder`]: Drag gesture to reorder intent
//! - [`notify`]: Change broadcast to read-only observers
//! - [`export`]: Markdown, JSON and bundle exports
//! - [`config`]: Configuration loading
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal output for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod notify;
pub mod reorder;
pub mod store;
