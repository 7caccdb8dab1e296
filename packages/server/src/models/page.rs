use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct PageRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content_html: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreatePageResponse {
    pub ok: bool,
    pub id: i32,
}

/// Response for the rich-text-editor file upload endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PageUploadResponse {
    pub ok: bool,
    /// Public URL of the stored file.
    #[schema(example = "/uploads/page_1700000000000_ab12cd34.png")]
    pub url: String,
}

pub fn validate_page_request(payload: &PageRequest) -> Result<(), AppError> {
    if payload.title.trim().is_empty() || payload.slug.trim().is_empty() {
        return Err(AppError::Validation("Title and slug are required".into()));
    }
    Ok(())
}
