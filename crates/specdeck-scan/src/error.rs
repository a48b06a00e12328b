use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The requested change matches neither the active nor the archive
    /// location.
    #[error("change directory not found: {name}")]
    ChangeNotFound { name: String, path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
