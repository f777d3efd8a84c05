//! Cross-platform configuration paths

use std::path::PathBuf;

use folio::error::FolioError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the OS config directory. Nothing is created on disk; folio only
    /// ever reads from here.
    pub fn new() -> Result<Self, FolioError> {
        let base = dirs::config_dir().ok_or_else(|| {
            FolioError::InvalidConfig("could not determine config directory".to_string())
        })?;
        Ok(Self {
            config_dir: base.join("folio"),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}
