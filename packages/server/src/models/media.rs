use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::media;

/// Response DTO for a single media asset.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaResponse {
    pub id: i32,
    /// Display name, not guaranteed unique.
    #[schema(example = "spring-fest.png")]
    pub filename: String,
    /// Store-relative public URL.
    #[schema(example = "/uploads/slide_1700000000000_ab12cd34.png")]
    pub url: String,
    #[schema(example = "image/png")]
    pub mime: String,
    /// Size in bytes; 0 when unknown.
    pub size: i64,
    pub alt_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<media::Model> for MediaResponse {
    fn from(model: media::Model) -> Self {
        Self {
            id: model.id,
            filename: model.filename,
            url: model.url,
            mime: model.mime,
            size: model.size,
            alt_text: model.alt_text,
            created_at: model.created_at,
        }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateMediaRequest {
    #[serde(default)]
    pub alt_text: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadMediaResponse {
    pub ok: bool,
    /// Number of files stored and registered.
    pub uploaded: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DedupeResponse {
    pub ok: bool,
    /// Number of duplicate catalog rows removed.
    pub removed: usize,
}
