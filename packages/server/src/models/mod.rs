pub mod auth;
pub mod footer;
pub mod media;
pub mod menu;
pub mod overview;
pub mod page;
pub mod public;
pub mod settings;

use serde::Serialize;

/// Minimal acknowledgement body used by mutating endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl Default for OkResponse {
    fn default() -> Self {
        Self { ok: true }
    }
}
