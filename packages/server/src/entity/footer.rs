use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Footer content. A single row with id 1 is ensured at startup.
///
/// Link columns and socials are JSON stored as text; the public API parses
/// them before returning.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "footer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub col1_title: String,
    #[sea_orm(column_type = "Text")]
    pub col1_links: String,

    pub col2_title: String,
    #[sea_orm(column_type = "Text")]
    pub col2_links: String,

    pub col3_title: String,
    #[sea_orm(column_type = "Text")]
    pub col3_links: String,

    /// JSON object of social network name to URL.
    #[sea_orm(column_type = "Text")]
    pub socials: String,

    pub copyright_text: String,
}

impl ActiveModelBehavior for ActiveModel {}
