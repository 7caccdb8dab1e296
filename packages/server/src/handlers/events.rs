use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use chrono::NaiveDate;
use sea_orm::*;
use tracing::instrument;

use crate::entity::event;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::media::{RecordedUpload, record_media, store_file_field};
use crate::models::OkResponse;
use crate::state::AppState;

pub fn event_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024) // 32 MB
}

/// Multipart form for creating or updating an event.
#[derive(Default)]
struct EventForm {
    title: String,
    date: Option<NaiveDate>,
    description: String,
    image: Option<RecordedUpload>,
}

/// Collect the event form fields; the optional `image` file is persisted to
/// the upload store as a side effect.
async fn read_event_form(state: &AppState, multipart: &mut Multipart) -> Result<EventForm, AppError> {
    let mut form = EventForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("title") => form.title = read_text(field).await?,
            Some("date") => {
                let text = read_text(field).await?;
                let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Date must be YYYY-MM-DD".into()))?;
                form.date = Some(date);
            }
            Some("description") => form.description = read_text(field).await?,
            Some("image") if field.file_name().is_some() => {
                form.image = Some(store_file_field(state.uploads.as_ref(), "event", field).await?);
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
    path = "/api/admin/events",
    tag = "Events",
    operation_id = "listEvents",
    summary = "List events, most recent date first",
    responses(
        (status = 200, description = "Events"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_events(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<event::Model>>, AppError> {
    auth_user.require_admin()?;

    let rows = event::Entity::find()
        .order_by_desc(event::Column::Date)
        .order_by_desc(event::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/admin/events",
    tag = "Events",
    operation_id = "createEvent",
    summary = "Create an event",
    description = "Multipart form with `title`, `date` (YYYY-MM-DD), `description` and \
        an optional `image` file. The image is stored, referenced from the \
        event, and registered in the media library with the event title as \
        alt text.",
    request_body(content_type = "multipart/form-data", description = "Event fields plus optional image"),
    responses(
        (status = 200, description = "Created", body = OkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart))]
pub async fn create_event(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let form = read_event_form(&state, &mut multipart).await?;
    if form.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    let date = form
        .date
        .ok_or_else(|| AppError::Validation("Date is required".into()))?;

    let new_event = event::ActiveModel {
        title: Set(form.title.trim().to_string()),
        date: Set(date),
        description: Set(form.description),
        image: Set(form.image.as_ref().map(|f| f.stored.url.clone())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let saved = new_event.insert(&state.db).await?;

    if let Some(uploaded) = form.image {
        record_media(&state.db, &[uploaded], &saved.title).await;
    }

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    put,
    path = "/api/admin/events/{id}",
    tag = "Events",
    operation_id = "updateEvent",
    summary = "Update an event",
    description = "Same form as creation. When an `image` file is present the stored \
        reference is replaced and the new file registered in the media \
        library; the previous file is never deleted.",
    params(("id" = i32, Path, description = "Event ID")),
    request_body(content_type = "multipart/form-data", description = "Event fields plus optional image"),
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown event (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(event_id = id))]
pub async fn update_event(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let form = read_event_form(&state, &mut multipart).await?;
    if form.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    let date = form
        .date
        .ok_or_else(|| AppError::Validation("Date is required".into()))?;

    let existing = event::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    let mut active: event::ActiveModel = existing.into();
    active.title = Set(form.title.trim().to_string());
    active.date = Set(date);
    active.description = Set(form.description);
    if let Some(uploaded) = &form.image {
        active.image = Set(Some(uploaded.stored.url.clone()));
    }
    active.update(&state.db).await?;

    if let Some(uploaded) = form.image {
        record_media(&state.db, &[uploaded], form.title.trim()).await;
    }

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    delete,
    path = "/api/admin/events/{id}",
    tag = "Events",
    operation_id = "deleteEvent",
    summary = "Delete an event",
    description = "Removes the event row only. Its image stays in the upload store and \
        media library.",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(event_id = id))]
pub async fn delete_event(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    event::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(OkResponse::default()))
}
