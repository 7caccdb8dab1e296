use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::slide;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::media::{RecordedUpload, record_media, store_file_field};
use crate::models::OkResponse;
use crate::state::AppState;

pub fn slider_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024) // 32 MB
}

/// Multipart form for creating or updating a slide.
#[derive(Default)]
struct SlideForm {
    caption: Option<String>,
    link: Option<String>,
    sort_order: i32,
    image: Option<RecordedUpload>,
}

async fn read_slide_form(state: &AppState, multipart: &mut Multipart) -> Result<SlideForm, AppError> {
    let mut form = SlideForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("caption") => form.caption = Some(read_text(field).await?),
            Some("link") => form.link = Some(read_text(field).await?),
            Some("sort_order") => {
                let text = read_text(field).await?;
                form.sort_order = text.trim().parse().unwrap_or(0);
            }
            Some("image") if field.file_name().is_some() => {
                form.image = Some(store_file_field(state.uploads.as_ref(), "slide", field).await?);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))
}

#[utoipa::path(
    get,
    path = "/api/admin/slider",
    tag = "Slider",
    operation_id = "listSlides",
    summary = "List homepage slides in display order",
    responses(
        (status = 200, description = "Slides"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_slides(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<slide::Model>>, AppError> {
    auth_user.require_admin()?;

    let rows = slide::Entity::find()
        .order_by_asc(slide::Column::SortOrder)
        .order_by_asc(slide::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/admin/slider",
    tag = "Slider",
    operation_id = "createSlide",
    summary = "Create a slide",
    description = "Multipart form with optional `caption`, `link`, `sort_order` fields \
        and an optional `image` file. The image is stored, referenced from \
        the slide, and registered in the media library with the caption as \
        alt text.",
    request_body(content_type = "multipart/form-data", description = "Slide fields plus optional image"),
    responses(
        (status = 200, description = "Created", body = OkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn create_slide(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let form = read_slide_form(&state, &mut multipart).await?;

    let new_slide = slide::ActiveModel {
        image: Set(form.image.as_ref().map(|f| f.stored.url.clone())),
        caption: Set(form.caption.clone()),
        link: Set(form.link.clone()),
        sort_order: Set(form.sort_order),
        ..Default::default()
    };
    new_slide.insert(&state.db).await?;

    if let Some(uploaded) = form.image {
        record_media(&state.db, &[uploaded], form.caption.as_deref().unwrap_or("")).await;
    }

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    put,
    path = "/api/admin/slider/{id}",
    tag = "Slider",
    operation_id = "updateSlide",
    summary = "Update a slide",
    description = "Same form as creation. When an `image` file is present the stored \
        reference is replaced and the new file registered in the media \
        library; the previous file is never deleted.",
    params(("id" = i32, Path, description = "Slide ID")),
    request_body(content_type = "multipart/form-data", description = "Slide fields plus optional image"),
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown slide (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(slide_id = id))]
pub async fn update_slide(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let form = read_slide_form(&state, &mut multipart).await?;

    let existing = slide::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Slide not found".into()))?;

    let mut active: slide::ActiveModel = existing.into();
    active.caption = Set(form.caption.clone());
    active.link = Set(form.link.clone());
    active.sort_order = Set(form.sort_order);
    if let Some(uploaded) = &form.image {
        active.image = Set(Some(uploaded.stored.url.clone()));
    }
    active.update(&state.db).await?;

    if let Some(uploaded) = form.image {
        record_media(&state.db, &[uploaded], form.caption.as_deref().unwrap_or("")).await;
    }

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    delete,
    path = "/api/admin/slider/{id}",
    tag = "Slider",
    operation_id = "deleteSlide",
    summary = "Delete a slide",
    description = "Removes the slide row only; the image stays in the media library.",
    params(("id" = i32, Path, description = "Slide ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(slide_id = id))]
pub async fn delete_slide(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    slide::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(OkResponse::default()))
}
