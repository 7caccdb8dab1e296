use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub label: String,

    /// External or manual URL; used when no page is linked.
    pub url: Option<String>,

    pub page_id: Option<i32>,

    #[sea_orm(belongs_to, from = "page_id", to = "id")]
    pub page: BelongsTo<Option<super::page::Entity>>,

    /// Parent menu id for nesting; top-level items have none.
    pub parent_id: Option<i32>,

    pub sort_order: i32,
}

impl ActiveModelBehavior for ActiveModel {}
