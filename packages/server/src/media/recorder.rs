use common::storage::StoredFile;
use sea_orm::{ConnectionTrait, EntityTrait, Set};

use crate::entity::media;

/// One file persisted by an upload producer, pending catalog registration.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    /// Original filename from the multipart field.
    pub original_name: String,
    pub stored: StoredFile,
}

/// Register uploaded files in the central media catalog.
///
/// This is a best-effort secondary write: the owning feature row has already
/// been persisted, so a catalog failure is logged and swallowed rather than
/// failing the request. The reconciliation scan backfills anything dropped
/// here on the next catalog listing.
pub async fn record_media<C: ConnectionTrait>(db: &C, files: &[RecordedUpload], alt_text: &str) {
    if files.is_empty() {
        return;
    }

    let now = chrono::Utc::now();
    let rows: Vec<media::ActiveModel> = files
        .iter()
        .map(|f| media::ActiveModel {
            filename: Set(f.original_name.clone()),
            url: Set(f.stored.url.clone()),
            mime: Set(f.stored.mime.clone()),
            size: Set(f.stored.size),
            alt_text: Set(alt_text.to_string()),
            created_at: Set(now),
            ..Default::default()
        })
        .collect();

    if let Err(e) = media::Entity::insert_many(rows)
        .exec_without_returning(db)
        .await
    {
        tracing::warn!("media catalog insert failed: {}", e);
    }
}
