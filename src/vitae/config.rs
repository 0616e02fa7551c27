//! # Configuration
//!
//! Configuration is loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `VITAE_DATA_DIR`, `VITAE_STORAGE_KEY`, `VITAE_EXPORT_DIR`.
//! 2. **Config file**: `vitae.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where `<storage_key>.json` lives |
//! | `storage_key` | `resumeData` | Name of the stored document |
//! | `export_dir` | current directory | Where `vitae export` writes files |

use crate::error::Result;
use crate::store::DEFAULT_STORAGE_KEY;
use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "vitae.toml";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct VitaeConfig {
    /// Directory holding the stored resume.
    #[config(env = "VITAE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key; the document is saved as `<key>.json`.
    #[config(env = "VITAE_STORAGE_KEY", default = "resumeData")]
    pub storage_key: String,

    /// Default destination for exports.
    #[config(env = "VITAE_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,
}

impl Default for VitaeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_dir: None,
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "vitae", "vitae")
}

impl VitaeConfig {
    /// Loads env vars over `vitae.toml` in the OS config dir.
    pub fn load() -> Result<Self> {
        let file = project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME));
        Self::load_from(file.as_deref())
    }

    /// Same as [`load`](Self::load) with an explicit config file. A missing file is fine.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".vitae"))
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
