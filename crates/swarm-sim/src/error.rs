//! Errors surfaced by the engine and its file loaders.

use std::io;
use std::path::PathBuf;

use swarm_core::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// In-memory encode or decode failure.
    #[error("format error: {0}")]
    Format(String),

    #[error("terrain generation failed: {0}")]
    Terrain(#[source] io::Error),

    /// A snapshot is internally inconsistent.
    #[error("snapshot mismatch: {0}")]
    SnapshotMismatch(String),

    /// A hand-placed entity lies outside the field.
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),
}
