use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use serde_json::{Value, json};
use tracing::instrument;

use crate::entity::{event, page, slide};
use crate::error::{AppError, ErrorBody};
use crate::handlers::footer::footer_row;
use crate::handlers::menus::menus_with_slugs;
use crate::handlers::settings::settings_row;
use crate::models::footer::FooterResponse;
use crate::models::public::{IntroResponse, MenuNode, PublicEvent, PublicSlide, absolutize, menu_tree};
use crate::state::AppState;

/// Maximum number of events returned to the public site.
const PUBLIC_EVENT_LIMIT: u64 = 50;

#[utoipa::path(
    get,
    path = "/api/public/settings",
    tag = "Public",
    operation_id = "publicSettings",
    summary = "Site settings with the logo resolved to an absolute URL",
    responses((status = 200, description = "Settings")),
)]
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let row = settings_row(&state.db).await?;
    let base = &state.config.server.public_base_url;

    let mut value = serde_json::to_value(&row)
        .map_err(|e| AppError::Internal(format!("settings serialization failed: {e}")))?;
    if !row.logo.is_empty() {
        value["logo"] = json!(absolutize(base, &row.logo));
    }

    Ok(Json(value))
}

#[utoipa::path(
    get,
    path = "/api/public/menus",
    tag = "Public",
    operation_id = "publicMenus",
    summary = "Navigation menu as a nested tree",
    responses((status = 200, description = "Menu tree", body = [MenuNode])),
)]
#[instrument(skip(state))]
pub async fn menus(State(state): State<AppState>) -> Result<Json<Vec<MenuNode>>, AppError> {
    let rows = menus_with_slugs(&state.db).await?;
    let rows = rows
        .into_iter()
        .map(|(m, p)| (m, p.map(|p| p.slug)))
        .collect();
    Ok(Json(menu_tree(rows)))
}

#[utoipa::path(
    get,
    path = "/api/public/slider",
    tag = "Public",
    operation_id = "publicSlider",
    summary = "Homepage slides with absolute image URLs",
    responses((status = 200, description = "Slides in display order", body = [PublicSlide])),
)]
#[instrument(skip(state))]
pub async fn slider(State(state): State<AppState>) -> Result<Json<Vec<PublicSlide>>, AppError> {
    let rows = slide::Entity::find()
        .order_by_asc(slide::Column::SortOrder)
        .order_by_asc(slide::Column::Id)
        .all(&state.db)
        .await?;

    let base = &state.config.server.public_base_url;
    Ok(Json(
        rows.into_iter()
            .map(|s| PublicSlide::from_model(base, s))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/public/events",
    tag = "Public",
    operation_id = "publicEvents",
    summary = "Upcoming and recent events",
    responses((status = 200, description = "Events, most recent date first", body = [PublicEvent])),
)]
#[instrument(skip(state))]
pub async fn events(State(state): State<AppState>) -> Result<Json<Vec<PublicEvent>>, AppError> {
    let rows = event::Entity::find()
        .order_by_desc(event::Column::Date)
        .order_by_desc(event::Column::Id)
        .limit(PUBLIC_EVENT_LIMIT)
        .all(&state.db)
        .await?;

    let base = &state.config.server.public_base_url;
    Ok(Json(
        rows.into_iter()
            .map(|e| PublicEvent::from_model(base, e))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/public/page/{slug}",
    tag = "Public",
    operation_id = "publicPage",
    summary = "Fetch a page by slug",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Page"),
        (status = 404, description = "Unknown slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn page_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<page::Model>, AppError> {
    let row = page::Entity::find()
        .filter(page::Column::Slug.eq(&slug))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".into()))?;

    Ok(Json(row))
}

#[utoipa::path(
    get,
    path = "/api/public/intro",
    tag = "Public",
    operation_id = "publicIntro",
    summary = "Homepage introduction block",
    responses((status = 200, description = "Intro content", body = IntroResponse)),
)]
#[instrument(skip(state))]
pub async fn intro(State(state): State<AppState>) -> Result<Json<IntroResponse>, AppError> {
    let row = settings_row(&state.db).await?;
    let base = &state.config.server.public_base_url;

    // Prefer the intro image, fall back to the logo, else blank.
    let image = if !row.intro_image.is_empty() {
        absolutize(base, &row.intro_image)
    } else if !row.logo.is_empty() {
        absolutize(base, &row.logo)
    } else {
        String::new()
    };

    let intro_title = if !row.intro_title.is_empty() {
        row.intro_title
    } else if !row.school_name.is_empty() {
        row.school_name
    } else {
        "Introduction".to_string()
    };

    Ok(Json(IntroResponse {
        intro_title,
        intro_html: row.intro_html,
        image,
    }))
}

#[utoipa::path(
    get,
    path = "/api/public/footer",
    tag = "Public",
    operation_id = "publicFooter",
    summary = "Footer content with JSON columns parsed",
    responses((status = 200, description = "Footer", body = FooterResponse)),
)]
#[instrument(skip(state))]
pub async fn footer(State(state): State<AppState>) -> Result<Json<FooterResponse>, AppError> {
    let row = footer_row(&state.db).await?;
    Ok(Json(FooterResponse::from(row)))
}
