mod common;

use common::{MultipartForm, TestApp};
use sea_orm::*;
use serde_json::json;
use server::entity::media;

#[tokio::test]
async fn pages_crud_round_trip() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let res = app
        .post_json(
            "/api/admin/pages",
            Some(&token),
            &json!({
                "title": "About us",
                "slug": "about",
                "content_html": "<p>Hello</p>",
                "status": "published"
            }),
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["ok"], true);
    let id = res.body["id"].as_i64().unwrap();

    let res = app.get(&format!("/api/admin/pages/{id}"), Some(&token)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["slug"], "about");

    let res = app
        .put_json(
            &format!("/api/admin/pages/{id}"),
            Some(&token),
            &json!({ "title": "About the school", "slug": "about" }),
        )
        .await;
    assert_eq!(res.status, 200);

    let res = app.get("/api/public/page/about", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["title"], "About the school");

    let res = app.delete(&format!("/api/admin/pages/{id}"), Some(&token)).await;
    assert_eq!(res.status, 200);

    let res = app.get("/api/public/page/about", None).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn page_creation_requires_title_and_slug() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let res = app
        .post_json(
            "/api/admin/pages",
            Some(&token),
            &json!({ "title": "  ", "slug": "x" }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn duplicate_slugs_are_rejected_with_conflict() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let body = json!({ "title": "News", "slug": "news" });
    let res = app.post_json("/api/admin/pages", Some(&token), &body).await;
    assert_eq!(res.status, 200);
    let first_id = res.body["id"].as_i64().unwrap();

    let res = app.post_json("/api/admin/pages", Some(&token), &body).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");

    // Updating another page onto an occupied slug conflicts too, but a page
    // may keep its own slug.
    let res = app
        .post_json(
            "/api/admin/pages",
            Some(&token),
            &json!({ "title": "Events", "slug": "events" }),
        )
        .await;
    let second_id = res.body["id"].as_i64().unwrap();

    let res = app
        .put_json(
            &format!("/api/admin/pages/{second_id}"),
            Some(&token),
            &json!({ "title": "Events", "slug": "news" }),
        )
        .await;
    assert_eq!(res.status, 409);

    let res = app
        .put_json(
            &format!("/api/admin/pages/{first_id}"),
            Some(&token),
            &json!({ "title": "News again", "slug": "news" }),
        )
        .await;
    assert_eq!(res.status, 200);
}

#[tokio::test]
async fn updating_an_unknown_page_is_404() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let res = app
        .put_json(
            "/api/admin/pages/777",
            Some(&token),
            &json!({ "title": "Ghost", "slug": "ghost" }),
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn editor_upload_returns_a_url_and_registers_the_file() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let form = MultipartForm::new().file("file", "diagram.png", "image/png", b"png");
    let res = app.post_multipart("/api/admin/pages/upload", Some(&token), form).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["ok"], true);
    let url = res.body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/page_"));
    assert!(url.ends_with(".png"));

    let name = url.strip_prefix("/uploads/").unwrap();
    assert!(app.uploads_dir.join(name).exists());

    let catalog = media::Entity::find().one(&app.db).await.unwrap().unwrap();
    assert_eq!(catalog.url, url);
    assert_eq!(catalog.filename, "diagram.png");
    assert_eq!(catalog.alt_text, "");
}

#[tokio::test]
async fn editor_upload_without_a_file_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let form = MultipartForm::new().text("file", "not a file");
    let res = app.post_multipart("/api/admin/pages/upload", Some(&token), form).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
