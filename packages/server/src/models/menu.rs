use serde::{Deserialize, Serialize};

use crate::entity::{menu, page};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct MenuRequest {
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub page_id: Option<i32>,
    #[serde(default)]
    pub parent_id: Option<i32>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Menu row joined with the linked page's slug.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MenuResponse {
    pub id: i32,
    pub label: String,
    pub url: Option<String>,
    pub page_id: Option<i32>,
    pub parent_id: Option<i32>,
    pub sort_order: i32,
    pub page_slug: Option<String>,
}

impl MenuResponse {
    pub fn from_row(menu: menu::Model, page: Option<page::Model>) -> Self {
        Self {
            id: menu.id,
            label: menu.label,
            url: menu.url,
            page_id: menu.page_id,
            parent_id: menu.parent_id,
            sort_order: menu.sort_order,
            page_slug: page.map(|p| p.slug),
        }
    }
}
