use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    /// Rich-text body. May embed `/uploads/...` URLs; those references are
    /// advisory only and are never cascaded on media deletion.
    #[sea_orm(column_type = "Text")]
    pub content_html: String,

    /// `draft` or `published`.
    pub status: String,

    #[sea_orm(has_many)]
    pub menus: HasMany<super::menu::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
