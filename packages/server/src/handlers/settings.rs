use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::setting;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::media::{RecordedUpload, record_media, store_file_field};
use crate::models::OkResponse;
use crate::models::settings::SettingsForm;
use crate::state::AppState;

/// ID of the singleton settings row, ensured at startup.
pub(crate) const SETTINGS_ROW_ID: i32 = 1;

/// Multipart file fields the settings form may carry. The field name doubles
/// as the stored-name prefix.
const IMAGE_FIELDS: &[&str] = &["logo", "favicon", "intro_image", "og_image"];

pub fn settings_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(24 * 1024 * 1024) // 4 images at 5 MB plus form text
}

pub(crate) async fn settings_row<C: ConnectionTrait>(db: &C) -> Result<setting::Model, AppError> {
    setting::Entity::find_by_id(SETTINGS_ROW_ID)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal("settings row missing; seed did not run".into()))
}

#[utoipa::path(
    get,
    path = "/api/admin/settings",
    tag = "Settings",
    operation_id = "getSettings",
    summary = "Fetch site settings",
    responses(
        (status = 200, description = "Settings row"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_settings(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<setting::Model>, AppError> {
    auth_user.require_admin()?;
    Ok(Json(settings_row(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings",
    tag = "Settings",
    operation_id = "updateSettings",
    summary = "Update site settings",
    description = "Multipart form carrying the settings text fields plus optional \
        image fields `logo`, `favicon`, `intro_image` and `og_image` \
        (images only, 5 MB each). `remove_<field>=1` clears a stored image \
        reference without deleting the backing file. Uploaded images are \
        registered in the media library.",
    request_body(content_type = "multipart/form-data", description = "Settings fields plus optional images"),
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn update_settings(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let max_image_size = state.config.storage.max_image_size;
    let mut form = SettingsForm::default();
    let mut images: Vec<(String, RecordedUpload)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if IMAGE_FIELDS.contains(&name.as_str()) && field.file_name().is_some() {
            if !field
                .content_type()
                .is_some_and(|ct| ct.starts_with("image/"))
            {
                return Err(AppError::Validation("Only image files are allowed".into()));
            }
            let uploaded = store_file_field(state.uploads.as_ref(), &name, field).await?;
            if uploaded.stored.size as u64 > max_image_size {
                // Too late to refuse the write, but the reference is not kept.
                let _ = state.uploads.delete_by_url(&uploaded.stored.url).await;
                return Err(AppError::Validation(format!(
                    "Image exceeds maximum size of {max_image_size} bytes"
                )));
            }
            images.push((name, uploaded));
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))?;
            form.set_field(&name, text);
        }
    }

    let image_url = |field: &str| {
        images
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, f)| f.stored.url.clone())
    };

    let existing = settings_row(&state.db).await?;
    let mut active: setting::ActiveModel = existing.into();
    active.school_name = Set(form.school_name);
    active.phone = Set(form.phone);
    active.email = Set(form.email);
    active.theme_color = Set(form.theme_color);
    active.intro_title = Set(form.intro_title);
    active.intro_html = Set(form.intro_html);
    active.meta_title = Set(form.meta_title);
    active.meta_description = Set(form.meta_description);
    active.meta_keywords = Set(form.meta_keywords);
    active.og_title = Set(form.og_title);
    active.og_description = Set(form.og_description);
    active.updated_at = Set(chrono::Utc::now());

    if let Some(url) = image_url("logo") {
        active.logo = Set(url);
    } else if form.remove_logo {
        active.logo = Set(String::new());
    }
    if let Some(url) = image_url("favicon") {
        active.favicon = Set(url);
    } else if form.remove_favicon {
        active.favicon = Set(String::new());
    }
    if let Some(url) = image_url("intro_image") {
        active.intro_image = Set(url);
    } else if form.remove_intro_image {
        active.intro_image = Set(String::new());
    }
    if let Some(url) = image_url("og_image") {
        active.og_image = Set(url);
    } else if form.remove_og_image {
        active.og_image = Set(String::new());
    }

    active.update(&state.db).await?;

    let uploaded: Vec<RecordedUpload> = images.into_iter().map(|(_, f)| f).collect();
    record_media(&state.db, &uploaded, "").await;

    Ok(Json(OkResponse::default()))
}
