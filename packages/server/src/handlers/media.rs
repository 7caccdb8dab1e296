use std::collections::HashSet;

use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::media;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::media::{reconcile_uploads, store_file_field};
use crate::models::OkResponse;
use crate::models::media::{DedupeResponse, MediaResponse, UpdateMediaRequest, UploadMediaResponse};
use crate::state::AppState;

pub fn media_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024) // 64 MB
}

#[utoipa::path(
    get,
    path = "/api/admin/media",
    tag = "Media",
    operation_id = "listMedia",
    summary = "List the media library",
    description = "Reconciles the upload directory into the catalog (backfilling rows \
        for any file on disk the catalog does not know), then returns the full \
        catalog newest-first.",
    responses(
        (status = 200, description = "Media assets, newest first", body = [MediaResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 500, description = "Scan or query failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaResponse>>, AppError> {
    auth_user.require_admin()?;

    {
        let _guard = state.reconcile_lock.lock().await;
        reconcile_uploads(&state.db, state.uploads.as_ref()).await?;
    }

    let rows = media::Entity::find()
        .order_by_desc(media::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(MediaResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/admin/media",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload files directly into the media library",
    description = "Accepts one or more `files` multipart fields. Each file is stored \
        under a generated name and registered in the catalog.",
    request_body(content_type = "multipart/form-data", description = "One or more `files` fields"),
    responses(
        (status = 200, description = "Files stored", body = UploadMediaResponse),
        (status = 400, description = "No files uploaded (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn upload_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadMediaResponse>, AppError> {
    auth_user.require_admin()?;

    let mut stored = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("files") {
            stored.push(store_file_field(state.uploads.as_ref(), "media", field).await?);
        }
    }

    if stored.is_empty() {
        return Err(AppError::Validation("No files uploaded".into()));
    }

    // Unlike producer-side registration, the catalog row IS the primary
    // record for a direct upload, so failures surface as 500 here.
    let now = chrono::Utc::now();
    let rows: Vec<media::ActiveModel> = stored
        .iter()
        .map(|f| media::ActiveModel {
            filename: Set(f.original_name.clone()),
            url: Set(f.stored.url.clone()),
            mime: Set(f.stored.mime.clone()),
            size: Set(f.stored.size),
            alt_text: Set(String::new()),
            created_at: Set(now),
            ..Default::default()
        })
        .collect();
    media::Entity::insert_many(rows)
        .exec_without_returning(&state.db)
        .await?;

    Ok(Json(UploadMediaResponse {
        ok: true,
        uploaded: stored.len(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/admin/media/{id}",
    tag = "Media",
    operation_id = "updateMedia",
    summary = "Update a media asset's alt text",
    params(("id" = i32, Path, description = "Media asset ID")),
    request_body = UpdateMediaRequest,
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown media id (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(media_id = id))]
pub async fn update_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateMediaRequest>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let result = media::Entity::update_many()
        .col_expr(media::Column::AltText, Expr::value(payload.alt_text))
        .filter(media::Column::Id.eq(id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Media not found".into()));
    }

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    delete,
    path = "/api/admin/media/{id}",
    tag = "Media",
    operation_id = "deleteMedia",
    summary = "Delete a media asset and its backing file",
    description = "Removes the catalog row and the file it points at. A missing file \
        is not an error, and feature records referencing the URL are left \
        untouched (their references may dangle). Deleting an unknown id is a \
        no-op.",
    params(("id" = i32, Path, description = "Media asset ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(media_id = id))]
pub async fn delete_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    if let Some(row) = media::Entity::find_by_id(id).one(&state.db).await? {
        match state.uploads.delete_by_url(&row.url).await {
            Ok(_) => {}
            Err(e) => tracing::warn!("failed to delete upload {}: {}", row.url, e),
        }
    }

    // Row deletion runs unconditionally; file and row lifecycles are only
    // loosely coupled.
    media::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    post,
    path = "/api/admin/media/dedupe",
    tag = "Media",
    operation_id = "dedupeMedia",
    summary = "Remove duplicate catalog rows",
    description = "Maintenance operation: concurrent reconciliation scans can insert \
        two rows for one physical file. This removes later rows whose \
        normalized URL duplicates an earlier one, keeping the lowest id.",
    responses(
        (status = 200, description = "Duplicates removed", body = DedupeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn dedupe_media(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DedupeResponse>, AppError> {
    auth_user.require_admin()?;

    let rows = media::Entity::find()
        .order_by_asc(media::Column::Id)
        .all(&state.db)
        .await?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut duplicates: Vec<i32> = Vec::new();
    for row in rows {
        if !seen.insert(row.url.trim().to_lowercase()) {
            duplicates.push(row.id);
        }
    }

    let removed = duplicates.len();
    if !duplicates.is_empty() {
        media::Entity::delete_many()
            .filter(media::Column::Id.is_in(duplicates))
            .exec(&state.db)
            .await?;
        tracing::info!("Removed {} duplicate media rows", removed);
    }

    Ok(Json(DedupeResponse { ok: true, removed }))
}
