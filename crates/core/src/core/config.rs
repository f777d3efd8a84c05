//! Host configuration (JSON).
//!
//! Every field carries a serde default so a partial file, or none at all,
//! still yields a usable config.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

fn default_fps() -> u32 {
    60
}

fn default_average_window() -> usize {
    10
}

/// Longest reply delay a host will wait before showing a chat reply.
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartPoleConfig {
    /// Fixed seed for reproducible runs; `None` seeds from the host clock.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Frame rate used by hosts that drive the loop from a timer.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Episodes included in the trailing average shown on the HUD.
    #[serde(default = "default_average_window")]
    pub average_window: usize,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fps: default_fps(),
            average_window: default_average_window(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    /// Artificial "thinking" delay before a reply is shown.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Seed a fresh transcript with a greeting from the assistant.
    #[serde(default = "default_true")]
    pub greet_on_open: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reply_delay_ms: default_reply_delay_ms(),
            greet_on_open: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing-subscriber` env-filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub cartpole: CartPoleConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl FolioConfig {
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| FolioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json(&text).map_err(|source| FolioError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Like [`FolioConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(FolioError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=240).contains(&self.cartpole.fps) {
            return Err(FolioError::InvalidConfig(format!(
                "cartpole.fps must be in 1..=240 (got {})",
                self.cartpole.fps
            )));
        }
        if self.cartpole.average_window == 0 {
            return Err(FolioError::InvalidConfig(
                "cartpole.average_window must be at least 1".to_string(),
            ));
        }
        if self.chat.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(FolioError::InvalidConfig(format!(
                "chat.reply_delay_ms must be at most {MAX_REPLY_DELAY_MS} (got {})",
                self.chat.reply_delay_ms
            )));
        }
        Ok(())
    }
}
