//! Errors of the driver layer (file discovery, config loading, output).
//!
//! Signature extraction itself never fails: a missing hint or a missing
//! `return` is a normal result, and a malformed token buffer is a bug in the
//! tokenizer that panics.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("failed to write output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
