use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the fallible edges of folio: reading configuration and host
/// setup. Widget logic itself is total and never returns these.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
