use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::fs;

use super::error::StorageError;
use super::traits::{PUBLIC_PREFIX, StoredFile, UploadStore, public_url};

/// Length of the random token embedded in generated names.
const NAME_TOKEN_LEN: usize = 8;

/// Flat, filesystem-backed upload store.
///
/// All files live directly under the root directory. Names are generated as
/// `<prefix>_<millis>_<token><ext>`; the random token keeps two uploads that
/// land within the same millisecond from colliding.
pub struct FilesystemUploadStore {
    root: PathBuf,
}

impl FilesystemUploadStore {
    /// Create a store rooted at `root`, creating the directory if absent.
    pub async fn new(root: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Extract a safe, lower-cased extension (including the dot) from the
    /// original filename. Anything that is not a short alphanumeric suffix
    /// is dropped rather than carried into the stored name.
    fn extension_of(original_name: &str) -> String {
        match original_name.rsplit_once('.') {
            Some((stem, ext))
                if !stem.is_empty()
                    && !ext.is_empty()
                    && ext.len() <= 10
                    && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                format!(".{}", ext.to_ascii_lowercase())
            }
            _ => String::new(),
        }
    }

    fn generate_name(prefix: &str, original_name: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(NAME_TOKEN_LEN)
            .map(|b| (b as char).to_ascii_lowercase())
            .collect();
        let ext = Self::extension_of(original_name);
        format!("{prefix}_{millis}_{token}{ext}")
    }

    /// Map a public URL back to the basename it was generated from.
    fn name_from_url(url: &str) -> Result<&str, StorageError> {
        let name = url
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidName(url.to_string()))?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(StorageError::InvalidName(url.to_string()));
        }
        Ok(name)
    }
}

#[async_trait]
impl UploadStore for FilesystemUploadStore {
    async fn store(
        &self,
        prefix: &str,
        original_name: &str,
        mime_hint: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError> {
        // The root can disappear out from under a long-running process.
        fs::create_dir_all(&self.root).await?;

        let stored_name = Self::generate_name(prefix, original_name);
        fs::write(self.root.join(&stored_name), bytes).await?;

        let mime = mime_hint
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok(StoredFile {
            url: public_url(&stored_name),
            stored_name,
            mime,
            size: bytes.len() as i64,
        })
    }

    async fn list_files(&self) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type().await?.is_file() {
                names.push(name);
            }
        }
        Ok(names)
    }

    async fn file_size(&self, stored_name: &str) -> Result<u64, StorageError> {
        let meta = fs::metadata(self.root.join(stored_name)).await?;
        Ok(meta.len())
    }

    async fn delete_by_url(&self, url: &str) -> Result<bool, StorageError> {
        let name = Self::name_from_url(url)?;
        match fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, url: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(Self::name_from_url(url)?))
    }
}
