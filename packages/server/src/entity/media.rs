use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Central media library row.
///
/// `url` is the de-facto key against the filesystem but intentionally carries
/// no uniqueness constraint: duplicate avoidance happens in the reconciliation
/// scanner's in-memory known-URL set, and duplicates produced by racing scans
/// are repairable via the dedupe maintenance operation.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name (the original upload filename), not unique.
    pub filename: String,

    /// Store-relative public URL, e.g. `/uploads/slide_1700000000000_ab12cd34.png`.
    pub url: String,

    pub mime: String,

    /// Size in bytes; 0 when unknown.
    pub size: i64,

    pub alt_text: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
