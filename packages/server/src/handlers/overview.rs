use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, media, menu, page};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::overview::OverviewResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/admin/overview",
    tag = "Overview",
    operation_id = "overview",
    summary = "Dashboard counters",
    responses(
        (status = 200, description = "Counts of pages, events, media, menus", body = OverviewResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn overview(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<OverviewResponse>, AppError> {
    auth_user.require_admin()?;

    Ok(Json(OverviewResponse {
        pages: page::Entity::find().count(&state.db).await?,
        events: event::Entity::find().count(&state.db).await?,
        media: media::Entity::find().count(&state.db).await?,
        menus: menu::Entity::find().count(&state.db).await?,
    }))
}
