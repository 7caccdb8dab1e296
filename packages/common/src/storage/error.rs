use thiserror::Error;

/// Errors that can occur during upload storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL or filename does not resolve to a file inside the store root.
    #[error("invalid stored name: {0}")]
    InvalidName(String),
}
