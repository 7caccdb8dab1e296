mod common;

use common::{ADMIN_PASSWORD, TestApp};
use sea_orm::*;
use serde_json::json;
use server::entity::user;
use server::utils::hash;

#[tokio::test]
async fn login_returns_a_usable_token() {
    let app = TestApp::spawn().await;

    let res = app
        .post_json(
            "/api/admin/auth/login",
            None,
            &json!({ "username": "admin", "password": ADMIN_PASSWORD }),
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["username"], "admin");
    let token = res.body["token"].as_str().unwrap().to_string();

    let res = app.get("/api/admin/auth/me", Some(&token)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["username"], "admin");
    assert_eq!(res.body["role"], "admin");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::spawn().await;

    let res = app
        .post_json(
            "/api/admin/auth/login",
            None,
            &json!({ "username": "admin", "password": "wrong" }),
        )
        .await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "INVALID_CREDENTIALS");

    let res = app
        .post_json(
            "/api/admin/auth/login",
            None,
            &json!({ "username": "nobody", "password": ADMIN_PASSWORD }),
        )
        .await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "INVALID_CREDENTIALS");

    let res = app
        .post_json(
            "/api/admin/auth/login",
            None,
            &json!({ "username": "", "password": "" }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_admin_accounts_cannot_log_in() {
    let app = TestApp::spawn().await;

    let viewer = user::ActiveModel {
        username: Set("viewer".to_string()),
        password: Set(hash::hash_password("viewerpass").unwrap()),
        role: Set("viewer".to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    user::Entity::insert(viewer)
        .exec_without_returning(&app.db)
        .await
        .unwrap();

    // A correct password on a non-admin account reads the same as a bad one.
    let res = app
        .post_json(
            "/api/admin/auth/login",
            None,
            &json!({ "username": "viewer", "password": "viewerpass" }),
        )
        .await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn admin_routes_require_an_admin_token() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/admin/media", None).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");

    let res = app.get("/api/admin/media", Some("not-a-jwt")).await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");

    let res = app.get("/api/admin/media", Some(&app.visitor_token())).await;
    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn profile_updates_apply_to_the_stored_user() {
    let app = TestApp::spawn().await;
    let token = app.admin_token();

    let res = app
        .put_json("/api/admin/profile", Some(&token), &json!({}))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let res = app
        .put_json(
            "/api/admin/profile",
            Some(&token),
            &json!({ "username": "principal", "password": "newpass99" }),
        )
        .await;
    assert_eq!(res.status, 200);

    let res = app.get("/api/admin/profile", Some(&token)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["username"], "principal");

    // The old password no longer works; the new one does.
    let res = app
        .post_json(
            "/api/admin/auth/login",
            None,
            &json!({ "username": "principal", "password": ADMIN_PASSWORD }),
        )
        .await;
    assert_eq!(res.status, 401);

    let res = app
        .post_json(
            "/api/admin/auth/login",
            None,
            &json!({ "username": "principal", "password": "newpass99" }),
        )
        .await;
    assert_eq!(res.status, 200);
}
