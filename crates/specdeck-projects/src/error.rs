use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown project: {0}")]
    ProjectNotFound(String),

    /// The project is registered but has no filesystem root configured.
    /// Not recoverable without reconfiguration.
    #[error("project {0} has no configured path")]
    ProjectPathNotFound(String),

    #[error("registry file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
