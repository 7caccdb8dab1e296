use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::footer;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::OkResponse;
use crate::models::footer::FooterRequest;
use crate::state::AppState;

/// ID of the singleton footer row, ensured at startup.
pub(crate) const FOOTER_ROW_ID: i32 = 1;

pub(crate) async fn footer_row<C: ConnectionTrait>(db: &C) -> Result<footer::Model, AppError> {
    footer::Entity::find_by_id(FOOTER_ROW_ID)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal("footer row missing; seed did not run".into()))
}

#[utoipa::path(
    get,
    path = "/api/admin/footer",
    tag = "Footer",
    operation_id = "getFooter",
    summary = "Fetch the footer row",
    responses(
        (status = 200, description = "Footer content with raw JSON columns"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_footer(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<footer::Model>, AppError> {
    auth_user.require_admin()?;
    Ok(Json(footer_row(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/api/admin/footer",
    tag = "Footer",
    operation_id = "updateFooter",
    summary = "Replace the footer content",
    request_body = FooterRequest,
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_footer(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<FooterRequest>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    let serialize = |v: &serde_json::Value, fallback: &str| {
        if v.is_null() {
            fallback.to_string()
        } else {
            v.to_string()
        }
    };

    let existing = footer_row(&state.db).await?;
    let mut active: footer::ActiveModel = existing.into();
    active.col1_title = Set(payload.col1_title);
    active.col1_links = Set(serialize(&payload.col1_links, "[]"));
    active.col2_title = Set(payload.col2_title);
    active.col2_links = Set(serialize(&payload.col2_links, "[]"));
    active.col3_title = Set(payload.col3_title);
    active.col3_links = Set(serialize(&payload.col3_links, "[]"));
    active.socials = Set(serialize(&payload.socials, "{}"));
    active.copyright_text = Set(payload.copyright_text);
    active.update(&state.db).await?;

    Ok(Json(OkResponse::default()))
}
