use serde::Serialize;

/// Dashboard counters.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OverviewResponse {
    pub pages: u64,
    pub events: u64,
    pub media: u64,
    pub menus: u64,
}
