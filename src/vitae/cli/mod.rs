//! # CLI Layer
//!
//! This module is **one possible UI client** for vitae, not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Uses `std::process::exit` (via `main.rs`)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions and version string
//! - `commands`: `run()`, context setup and per-command handlers
//! - `render`: terminal formatting of documents and messages
//!
//! Positions typed on the command line (`move`, `bullet`, field paths) start
//! at 1; the session API underneath is 0-based.

mod commands;
mod render;
mod setup;

pub use commands::run;
pub use render::print_error;
