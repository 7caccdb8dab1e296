use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Homepage slider entry.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "slide")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Weak reference to a media URL; may dangle after media deletion.
    pub image: Option<String>,

    pub caption: Option<String>,

    pub link: Option<String>,

    pub sort_order: i32,
}

impl ActiveModelBehavior for ActiveModel {}
