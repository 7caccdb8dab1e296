use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;

use super::error::StorageError;

/// Public path prefix under which all stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Result of persisting one uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    /// Generated on-disk name, e.g. `slide_1700000000000_k3f8a2dq.png`.
    pub stored_name: String,
    /// Store-relative public URL, always `/uploads/<stored_name>`.
    /// Absolute-URL resolution is the public API layer's concern.
    pub url: String,
    /// Content type, taken from the upload's hint or guessed from the name.
    pub mime: String,
    /// Size in bytes.
    pub size: i64,
}

/// Flat blob store for uploaded files.
///
/// Every upload-accepting endpoint persists bytes through this trait and
/// embeds the returned URL in its own record. The store makes no uniqueness
/// or ownership guarantees beyond the generated name.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist `bytes` under a generated name derived from `prefix` and the
    /// original filename's extension.
    async fn store(
        &self,
        prefix: &str,
        original_name: &str,
        mime_hint: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError>;

    /// Basenames of all regular files in the store root, excluding dotfiles.
    /// No ordering guarantee beyond directory enumeration order.
    async fn list_files(&self) -> Result<Vec<String>, StorageError>;

    /// Size in bytes of a stored file.
    async fn file_size(&self, stored_name: &str) -> Result<u64, StorageError>;

    /// Delete the file backing a public URL. Returns `false` when the file
    /// was already gone; deletion is idempotent with respect to the
    /// filesystem.
    async fn delete_by_url(&self, url: &str) -> Result<bool, StorageError>;

    /// Filesystem path a public URL resolves to.
    fn resolve(&self, url: &str) -> Result<PathBuf, StorageError>;
}

/// Public URL for a stored basename.
pub fn public_url(stored_name: &str) -> String {
    format!("{PUBLIC_PREFIX}/{stored_name}")
}
