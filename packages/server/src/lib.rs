pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod media;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School CMS API",
        version = "1.0.0",
        description = "Content-management backend: pages, menus, media library, \
            homepage slider, events, footer and site settings"
    ),
    paths(
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::get_profile,
        handlers::auth::update_profile,
        handlers::overview::overview,
        handlers::pages::list_pages,
        handlers::pages::get_page,
        handlers::pages::create_page,
        handlers::pages::update_page,
        handlers::pages::delete_page,
        handlers::pages::upload_page_file,
        handlers::menus::list_menus,
        handlers::menus::create_menu,
        handlers::menus::update_menu,
        handlers::menus::delete_menu,
        handlers::slider::list_slides,
        handlers::slider::create_slide,
        handlers::slider::update_slide,
        handlers::slider::delete_slide,
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::update_event,
        handlers::events::delete_event,
        handlers::media::list_media,
        handlers::media::upload_media,
        handlers::media::update_media,
        handlers::media::delete_media,
        handlers::media::dedupe_media,
        handlers::footer::get_footer,
        handlers::footer::update_footer,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::public::settings,
        handlers::public::menus,
        handlers::public::slider,
        handlers::public::events,
        handlers::public::page_by_slug,
        handlers::public::intro,
        handlers::public::footer,
    ),
    tags(
        (name = "Auth", description = "Admin authentication and profile"),
        (name = "Overview", description = "Dashboard counters"),
        (name = "Pages", description = "Page CRUD and rich-text uploads"),
        (name = "Menus", description = "Navigation menu management"),
        (name = "Slider", description = "Homepage slider management"),
        (name = "Events", description = "Event management"),
        (name = "Media", description = "Media library, reconciliation and maintenance"),
        (name = "Footer", description = "Footer content"),
        (name = "Settings", description = "Site-wide settings"),
        (name = "Public", description = "Unauthenticated site content"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let cors = &state.config.server.cors;
    let origin = if cors.allow_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allow_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors.max_age))
}

/// Build the application router, including static `/uploads` serving and the
/// API documentation UIs.
pub fn build_router(state: AppState, uploads_dir: &std::path::Path) -> axum::Router {
    let api = ApiDoc::openapi();

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(cors_layer(&state))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
