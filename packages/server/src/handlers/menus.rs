use axum::Json;
use axum::extract::{Path, State};
use sea_orm::sea_query::NullOrdering;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{menu, page};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::OkResponse;
use crate::models::menu::{MenuRequest, MenuResponse};
use crate::state::AppState;

/// Menus joined with their page slugs, parents before children.
pub(crate) async fn menus_with_slugs<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<(menu::Model, Option<page::Model>)>, AppError> {
    let rows = menu::Entity::find()
        .find_also_related(page::Entity)
        .order_by_with_nulls(menu::Column::ParentId, Order::Asc, NullOrdering::First)
        .order_by_asc(menu::Column::SortOrder)
        .order_by_asc(menu::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

#[utoipa::path(
    get,
    path = "/api/admin/menus",
    tag = "Menus",
    operation_id = "listMenus",
    summary = "List menu items with linked page slugs",
    responses(
        (status = 200, description = "Menu items, parents first", body = [MenuResponse]),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_menus(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuResponse>>, AppError> {
    auth_user.require_admin()?;

    let rows = menus_with_slugs(&state.db).await?;
    Ok(Json(
        rows.into_iter()
            .map(|(m, p)| MenuResponse::from_row(m, p))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/menus",
    tag = "Menus",
    operation_id = "createMenu",
    summary = "Create a menu item",
    request_body = MenuRequest,
    responses(
        (status = 200, description = "Created", body = OkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(label = %payload.label))]
pub async fn create_menu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<MenuRequest>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    if payload.label.trim().is_empty() {
        return Err(AppError::Validation("Label is required".into()));
    }

    let new_menu = menu::ActiveModel {
        label: Set(payload.label.trim().to_string()),
        url: Set(payload.url),
        page_id: Set(payload.page_id),
        parent_id: Set(payload.parent_id),
        sort_order: Set(payload.sort_order),
        ..Default::default()
    };
    new_menu.insert(&state.db).await?;

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    put,
    path = "/api/admin/menus/{id}",
    tag = "Menus",
    operation_id = "updateMenu",
    summary = "Update a menu item",
    params(("id" = i32, Path, description = "Menu item ID")),
    request_body = MenuRequest,
    responses(
        (status = 200, description = "Updated", body = OkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Unknown menu item (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(menu_id = id))]
pub async fn update_menu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<MenuRequest>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    if payload.label.trim().is_empty() {
        return Err(AppError::Validation("Label is required".into()));
    }

    let existing = menu::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu item not found".into()))?;

    let mut active: menu::ActiveModel = existing.into();
    active.label = Set(payload.label.trim().to_string());
    active.url = Set(payload.url);
    active.page_id = Set(payload.page_id);
    active.parent_id = Set(payload.parent_id);
    active.sort_order = Set(payload.sort_order);
    active.update(&state.db).await?;

    Ok(Json(OkResponse::default()))
}

#[utoipa::path(
    delete,
    path = "/api/admin/menus/{id}",
    tag = "Menus",
    operation_id = "deleteMenu",
    summary = "Delete a menu item",
    params(("id" = i32, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Deleted", body = OkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(menu_id = id))]
pub async fn delete_menu(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OkResponse>, AppError> {
    auth_user.require_admin()?;

    menu::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(OkResponse::default()))
}
