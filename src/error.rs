//! Error types for dgc

use crate::collector::ResourceKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dgc operations
pub type Result<T> = std::result::Result<T, DgcError>;

/// dgc error types
#[derive(Error, Debug)]
pub enum DgcError {
    #[error("Failed to connect to the engine at {endpoint}: {message}")]
    Connect { endpoint: String, message: String },

    #[error("Failed to retrieve {kind}s from the engine: {message}")]
    Inventory { kind: ResourceKind, message: String },

    #[error("Docker API error: {0}")]
    Docker(#[from] bollard::errors::Error),

    #[error("Invalid timestamp for {id}: {message}")]
    InvalidTimestamp { id: String, message: String },

    #[error("Failed to read exclude source {}: {source}", path.display())]
    ExcludeSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DgcError {
    /// Wrap an engine failure that happened while listing one kind of resource
    pub fn inventory(kind: ResourceKind, err: DgcError) -> Self {
        match err {
            DgcError::Inventory { .. } => err,
            other => DgcError::Inventory {
                kind,
                message: other.to_string(),
            },
        }
    }
}
