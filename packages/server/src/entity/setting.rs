use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site-wide settings. A single row with id 1 is ensured at startup.
///
/// The image columns hold weak `/uploads/...` references written by the
/// settings upload producer; clearing them never deletes the backing file.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "setting")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub school_name: String,
    pub phone: String,
    pub email: String,
    pub theme_color: String,

    pub logo: String,
    pub favicon: String,

    pub intro_title: String,
    #[sea_orm(column_type = "Text")]
    pub intro_html: String,
    pub intro_image: String,

    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,

    pub og_title: String,
    pub og_description: String,
    pub og_image: String,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
