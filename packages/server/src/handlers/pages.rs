use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::page;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::media::{record_media, store_file_field};
use crate::models::OkResponse;
use crate::models::page::{
    CreatePageResponse, PageRequest, PageUploadResponse, validate_page_request,
};
use crate::state::AppState;

pub fn page_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024) // 32 MB
}

#[utoipa::path(
    get,
    path = "/api/admin/pages",
    tag = "Pages",
    operation_id = "listPages",
    summary = "List pages, newest first",
    responses(
        (status = 200, description = "Pages"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_pages(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<page::Model>>, AppError> {
    auth_user.require_admin()?;

    let rows = page::Entity::find()
        .order_by_desc(page::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/admin/pages/{id}",
    tag = "Pages",
    operation_id = "getPage",
    summary = "Fetch one page",
    params(("id" = i32, Path, description = "Page ID")),
    responses(
        (status = 200, description = "Page"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Unknown page (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(page_id = id))]
pub async fn get_page(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<page::Model>, AppError> {
    auth_user.require_admin()?;

    let row = page::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".into()))?;

    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/admin/pages",
    tag = "Pages",
    operation_id = "createPage",
    summary = "Create a page",
    request_body = PageRequest,
    responses(
        (status = 200, description = "Created", body = CreatePageResponse),
        (status = 400, description = "Missing title or slug (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Slug already in use (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(slug = %payload.slug))]
pub async fn create_page(
    auth_user: AuthUser,
    State(state): State<AppState>,
    crate::extractors::json::AppJson(payload): crate::extractors::json::AppJson<PageRequest>,
) -> Result<Json<CreatePageResponse>, AppError> {
    auth_user.require_admin()?;
    validate_page_request(&payload)?;

    let slug = payload.slug.trim().to_string();
    let now = chrono::Utc::now();
    let new_page = page::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        slug: Set(slug),
        content_html: Set(payload.content_html),
        status: Set(payload.status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_page.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Slug already exists, choose another one".into())
        }
        _ => AppError::from(e),
    })?;

    Ok(Json(CreatePageResponse {
        ok: true,
        id: saved.id,
    }))
}

#[utoipa::path(
    put,
    path = "/api/admin/pages/{id}",
    tag = "Pages",
    operation_id = "updatePage",
    summary = "Update a page",
    params(("id" = i32, Path, description = "Page ID")),
    request_body = PageRequest,
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 400, description = "Missing title or slug (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Unknown page (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug used by another page (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(page_id = id))]
pub async fn update_page(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    crate::extractors::json::AppJson(payload): crate::extractors::json::AppJson<PageRequest>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;
    validate_page_request(&payload)?;

    let slug = payload.slug.trim().to_string();

    let taken = page::Entity::find()
        .filter(page::Column::Slug.eq(&slug))
        .filter(page::Column::Id.ne(id))
        .one(&state.db)
        .await?;
    if taken.is_some() {
        return Err(AppError::Conflict("Another page already uses this slug".into()));
    }

    let existing = page::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".into()))?;

    let mut active: page::ActiveModel = existing.into();
    active.title = Set(payload.title.trim().to_string());
    active.slug = Set(slug);
    active.content_html = Set(payload.content_html);
    active.status = Set(payload.status);
    active.updated_at = Set(chrono::Utc::now());
    active.update(&state.db).await?;

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    delete,
    path = "/api/admin/pages/{id}",
    tag = "Pages",
    operation_id = "deletePage",
    summary = "Delete a page",
    params(("id" = i32, Path, description = "Page ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(page_id = id))]
pub async fn delete_page(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    page::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    post,
    path = "/api/admin/pages/upload",
    tag = "Pages",
    operation_id = "uploadPageFile",
    summary = "Upload a file from the rich-text editor",
    description = "Stores the `file` multipart field and registers it in the media \
        library; the returned URL is meant to be embedded in page HTML.",
    request_body(content_type = "multipart/form-data", description = "A single `file` field"),
    responses(
        (status = 200, description = "Stored", body = PageUploadResponse),
        (status = 400, description = "No file uploaded (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn upload_page_file(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PageUploadResponse>, AppError> {
    auth_user.require_admin()?;

    let mut uploaded = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") && field.file_name().is_some() {
            uploaded = Some(store_file_field(state.uploads.as_ref(), "page", field).await?);
        }
    }

    let uploaded = uploaded.ok_or_else(|| AppError::Validation("No file uploaded".into()))?;
    let url = uploaded.stored.url.clone();

    record_media(&state.db, &[uploaded], "").await;

    Ok(Json(PageUploadResponse { ok: true, url }))
}
