mod common;

use common::{BASE_URL, MultipartForm, TestApp};
use serde_json::json;

#[tokio::test]
async fn public_menus_nest_children_and_carry_page_slugs() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let res = app
        .post_json(
            "/api/admin/pages",
            Some(&token),
            &json!({ "title": "Admissions", "slug": "admissions" }),
        )
        .await;
    let page_id = res.body["id"].as_i64().unwrap();

    app.post_json(
        "/api/admin/menus",
        Some(&token),
        &json!({ "label": "Home", "url": "/", "sort_order": 1 }),
    )
    .await;
    app.post_json(
        "/api/admin/menus",
        Some(&token),
        &json!({ "label": "About", "sort_order": 2 }),
    )
    .await;

    let res = app.get("/api/admin/menus", Some(&token)).await;
    let about_id = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["label"] == "About")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    app.post_json(
        "/api/admin/menus",
        Some(&token),
        &json!({
            "label": "Admissions",
            "page_id": page_id,
            "parent_id": about_id,
            "sort_order": 1
        }),
    )
    .await;

    let res = app.get("/api/public/menus", None).await;
    assert_eq!(res.status, 200);
    let tree = res.body.as_array().unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0]["label"], "Home");
    assert_eq!(tree[1]["label"], "About");

    let children = tree[1]["children"].as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["label"], "Admissions");
    assert_eq!(children[0]["page_slug"], "admissions");
}

#[tokio::test]
async fn menu_items_require_a_label() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let res = app
        .post_json("/api/admin/menus", Some(&token), &json!({ "label": "  " }))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn settings_update_accepts_text_and_image_fields() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let form = MultipartForm::new()
        .text("school_name", "Northside High")
        .text("theme_color", "#aa0000")
        .file("logo", "crest.png", "image/png", b"crest bytes");
    let res = app.put_multipart("/api/admin/settings", Some(&token), form).await;
    assert_eq!(res.status, 200);

    let res = app.get("/api/admin/settings", Some(&token)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["school_name"], "Northside High");
    assert_eq!(res.body["theme_color"], "#aa0000");
    let logo = res.body["logo"].as_str().unwrap().to_string();
    assert!(logo.starts_with("/uploads/logo_"));

    // The public view resolves the logo against the configured base URL.
    let res = app.get("/api/public/settings", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(
        res.body["logo"].as_str().unwrap(),
        format!("{BASE_URL}{logo}")
    );
}

#[tokio::test]
async fn settings_image_fields_only_accept_images() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let form = MultipartForm::new().file("logo", "script.sh", "text/x-shellscript", b"#!/bin/sh");
    let res = app.put_multipart("/api/admin/settings", Some(&token), form).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "Only image files are allowed");
}

#[tokio::test]
async fn remove_flag_clears_an_image_without_replacing_it() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let form = MultipartForm::new().file("favicon", "fav.ico", "image/x-icon", b"icon");
    app.put_multipart("/api/admin/settings", Some(&token), form).await;

    let res = app.get("/api/admin/settings", Some(&token)).await;
    let favicon = res.body["favicon"].as_str().unwrap().to_string();
    assert!(!favicon.is_empty());

    let form = MultipartForm::new().text("remove_favicon", "1");
    app.put_multipart("/api/admin/settings", Some(&token), form).await;

    let res = app.get("/api/admin/settings", Some(&token)).await;
    assert_eq!(res.body["favicon"], "");

    // Clearing the reference leaves the file itself alone.
    let name = favicon.strip_prefix("/uploads/").unwrap();
    assert!(app.uploads_dir.join(name).exists());
}

#[tokio::test]
async fn intro_falls_back_through_settings_fields() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    // Fresh install: everything blank.
    let res = app.get("/api/public/intro", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["intro_title"], "Introduction");
    assert_eq!(res.body["image"], "");

    let form = MultipartForm::new()
        .text("school_name", "Northside High")
        .file("logo", "crest.png", "image/png", b"crest");
    app.put_multipart("/api/admin/settings", Some(&token), form).await;

    // With no intro of its own, the block borrows the school name and logo.
    let res = app.get("/api/public/intro", None).await;
    assert_eq!(res.body["intro_title"], "Northside High");
    assert!(
        res.body["image"]
            .as_str()
            .unwrap()
            .starts_with(&format!("{BASE_URL}/uploads/logo_"))
    );
}

#[tokio::test]
async fn footer_round_trips_its_json_columns() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    // Seed defaults parse to empty collections.
    let res = app.get("/api/public/footer", None).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["col1_links"], json!([]));
    assert_eq!(res.body["socials"], json!({}));

    let res = app
        .put_json(
            "/api/admin/footer",
            Some(&token),
            &json!({
                "col1_title": "Quick links",
                "col1_links": [{ "label": "Admissions", "url": "/page/admissions" }],
                "socials": { "facebook": "https://fb.example/ns" },
                "copyright_text": "© Northside High"
            }),
        )
        .await;
    assert_eq!(res.status, 200);

    let res = app.get("/api/public/footer", None).await;
    assert_eq!(res.body["col1_title"], "Quick links");
    assert_eq!(res.body["col1_links"][0]["label"], "Admissions");
    assert_eq!(res.body["socials"]["facebook"], "https://fb.example/ns");
    assert_eq!(res.body["copyright_text"], "© Northside High");
}

#[tokio::test]
async fn overview_counts_track_created_content() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    app.post_json(
        "/api/admin/pages",
        Some(&token),
        &json!({ "title": "One", "slug": "one" }),
    )
    .await;
    app.post_json(
        "/api/admin/pages",
        Some(&token),
        &json!({ "title": "Two", "slug": "two" }),
    )
    .await;
    app.post_json(
        "/api/admin/menus",
        Some(&token),
        &json!({ "label": "Home" }),
    )
    .await;

    let res = app.get("/api/admin/overview", Some(&token)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["pages"], 2);
    assert_eq!(res.body["menus"], 1);
    assert_eq!(res.body["media"], 0);
}

#[tokio::test]
async fn uploaded_files_are_served_statically() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let form = MultipartForm::new().file("files", "served.txt", "text/plain", b"hello");
    app.post_multipart("/api/admin/media", Some(&token), form).await;

    let mut entries = tokio::fs::read_dir(&app.uploads_dir).await.unwrap();
    let name = entries
        .next_entry()
        .await
        .unwrap()
        .unwrap()
        .file_name()
        .into_string()
        .unwrap();

    let res = app.get(&format!("/uploads/{name}"), None).await;
    assert_eq!(res.status, 200);
}
