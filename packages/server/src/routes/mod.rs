use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/public", public_routes())
        .nest("/admin", admin_routes())
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(handlers::public::settings))
        .route("/menus", get(handlers::public::menus))
        .route("/slider", get(handlers::public::slider))
        .route("/events", get(handlers::public::events))
        .route("/page/{slug}", get(handlers::public::page_by_slug))
        .route("/intro", get(handlers::public::intro))
        .route("/footer", get(handlers::public::footer))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .route(
            "/profile",
            get(handlers::auth::get_profile).put(handlers::auth::update_profile),
        )
        .route("/overview", get(handlers::overview::overview))
        .nest("/pages", page_routes())
        .nest("/menus", menu_routes())
        .nest("/slider", slider_routes())
        .nest("/events", event_routes())
        .nest("/media", media_routes())
        .route(
            "/footer",
            get(handlers::footer::get_footer).put(handlers::footer::update_footer),
        )
        .nest("/settings", settings_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

fn page_routes() -> Router<AppState> {
    let crud = Router::new()
        .route(
            "/",
            get(handlers::pages::list_pages).post(handlers::pages::create_page),
        )
        .route(
            "/{id}",
            get(handlers::pages::get_page)
                .put(handlers::pages::update_page)
                .delete(handlers::pages::delete_page),
        );

    let upload = Router::new()
        .route("/upload", post(handlers::pages::upload_page_file))
        .layer(handlers::pages::page_upload_body_limit());

    crud.merge(upload)
}

fn menu_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::menus::list_menus).post(handlers::menus::create_menu),
        )
        .route(
            "/{id}",
            put(handlers::menus::update_menu).delete(handlers::menus::delete_menu),
        )
}

fn slider_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::slider::list_slides).post(handlers::slider::create_slide),
        )
        .route(
            "/{id}",
            put(handlers::slider::update_slide).delete(handlers::slider::delete_slide),
        )
        .layer(handlers::slider::slider_upload_body_limit())
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/{id}",
            put(handlers::events::update_event).delete(handlers::events::delete_event),
        )
        .layer(handlers::events::event_upload_body_limit())
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::media::list_media).post(handlers::media::upload_media),
        )
        .route("/dedupe", post(handlers::media::dedupe_media))
        .route(
            "/{id}",
            put(handlers::media::update_media).delete(handlers::media::delete_media),
        )
        .layer(handlers::media::media_upload_body_limit())
}

fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .layer(handlers::settings::settings_upload_body_limit())
}
