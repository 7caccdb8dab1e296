use axum::extract::multipart::Field;
use common::storage::UploadStore;

use super::recorder::RecordedUpload;
use crate::error::AppError;

/// Persist one multipart file field through the upload store.
///
/// The content type comes from the field when present, otherwise it is
/// guessed from the filename. The generated stored name uses `prefix` and
/// keeps the original extension.
pub async fn store_file_field(
    store: &dyn UploadStore,
    prefix: &str,
    field: Field<'_>,
) -> Result<RecordedUpload, AppError> {
    let original_name = field
        .file_name()
        .filter(|n| !n.is_empty())
        .unwrap_or("file")
        .to_string();

    let mime_hint = field
        .content_type()
        .map(str::to_string)
        .or_else(|| {
            mime_guess::from_path(&original_name)
                .first()
                .map(|m| m.to_string())
        });

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;

    let stored = store
        .store(prefix, &original_name, mime_hint.as_deref(), &bytes)
        .await?;

    Ok(RecordedUpload {
        original_name,
        stored,
    })
}
