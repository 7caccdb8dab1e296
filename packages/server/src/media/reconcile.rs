use std::collections::HashSet;

use common::storage::{UploadStore, public_url};
use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect, Set};

use crate::entity::media;
use crate::error::AppError;

/// Extensions mapped to `image/<ext>` when backfilling; everything else gets
/// a generic binary type.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Best-effort MIME type for a file discovered on disk with no catalog row.
pub fn sniff_mime(stored_name: &str) -> String {
    match stored_name.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                format!("image/{ext}")
            } else {
                "application/octet-stream".to_string()
            }
        }
        None => "application/octet-stream".to_string(),
    }
}

/// Files on disk whose would-be public URL is not yet known to the catalog.
///
/// URL comparison is case-insensitive: a row for `/uploads/Foo.png`
/// suppresses backfill of a disk file `foo.png`.
pub fn plan_backfill<'a>(files: &'a [String], known_urls: &HashSet<String>) -> Vec<&'a str> {
    files
        .iter()
        .filter(|name| !known_urls.contains(&public_url(name).to_lowercase()))
        .map(String::as_str)
        .collect()
}

/// Reconcile the upload store into the media catalog.
///
/// Runs at the start of every catalog listing: any file present on disk with
/// no matching row is staged with sniffed metadata and bulk-inserted. The
/// scan is idempotent; a second pass with no filesystem change inserts
/// nothing. Errors abort the listing request entirely.
///
/// Callers must hold the state's reconcile lock so that concurrent listings
/// do not both backfill the same orphan.
pub async fn reconcile_uploads<C: ConnectionTrait>(
    db: &C,
    store: &dyn UploadStore,
) -> Result<usize, AppError> {
    let files = store.list_files().await?;

    let known: HashSet<String> = media::Entity::find()
        .select_only()
        .column(media::Column::Url)
        .into_tuple::<String>()
        .all(db)
        .await?
        .into_iter()
        .map(|url| url.trim().to_lowercase())
        .collect();

    let orphans = plan_backfill(&files, &known);
    if orphans.is_empty() {
        return Ok(0);
    }

    let now = chrono::Utc::now();
    let mut staged = Vec::with_capacity(orphans.len());
    for name in orphans {
        let size = store.file_size(name).await?;
        staged.push(media::ActiveModel {
            filename: Set(name.to_string()),
            url: Set(public_url(name)),
            mime: Set(sniff_mime(name)),
            size: Set(size as i64),
            alt_text: Set(String::new()),
            created_at: Set(now),
            ..Default::default()
        });
    }

    let count = staged.len();
    media::Entity::insert_many(staged)
        .exec_without_returning(db)
        .await?;
    tracing::info!("Backfilled {} orphaned uploads into the media catalog", count);

    Ok(count)
}
