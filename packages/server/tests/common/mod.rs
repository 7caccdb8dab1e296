use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use common::storage::FilesystemUploadStore;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

use server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageConfig,
};
use server::state::AppState;

pub const JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const ADMIN_PASSWORD: &str = "pass1234";
pub const BASE_URL: &str = "http://cms.test";

/// A CMS application wired against an in-memory SQLite database and a
/// temporary upload directory, driven through `oneshot` requests.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub uploads_dir: PathBuf,
    _tmp: tempfile::TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let uploads_dir = tmp.path().join("uploads");

        // A single pooled connection keeps every query on the same
        // in-memory database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts)
            .await
            .expect("Failed to open in-memory database");
        db.get_schema_registry("server::entity::*")
            .sync(&db)
            .await
            .expect("Failed to sync schema");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                public_base_url: BASE_URL.to_string(),
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
                admin_username: "admin".to_string(),
                admin_password: ADMIN_PASSWORD.to_string(),
            },
            storage: StorageConfig {
                upload_dir: uploads_dir.to_string_lossy().into_owned(),
                max_image_size: 5 * 1024 * 1024,
            },
        };

        server::seed::ensure_singletons(&db)
            .await
            .expect("Failed to seed singletons");
        server::seed::seed_admin_user(&db, &config.auth)
            .await
            .expect("Failed to seed admin user");

        let store = FilesystemUploadStore::new(uploads_dir.clone())
            .await
            .expect("Failed to create upload store");
        let state = AppState::new(db.clone(), config, Arc::new(store));
        let router = server::build_router(state, &uploads_dir);

        Self {
            router,
            db,
            uploads_dir,
            _tmp: tmp,
        }
    }

    /// Bearer token for the seeded admin user.
    pub fn admin_token(&self) -> String {
        server::utils::jwt::sign(1, "admin", "admin", JWT_SECRET).expect("Failed to sign token")
    }

    /// Bearer token carrying a non-admin role.
    pub fn visitor_token(&self) -> String {
        server::utils::jwt::sign(2, "visitor", "viewer", JWT_SECRET).expect("Failed to sign token")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Request::get(uri), token, None, Body::empty()).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Request::delete(uri), token, None, Body::empty())
            .await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.send(
            Request::post(uri),
            token,
            Some("application/json"),
            Body::from(body.to_string()),
        )
        .await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.send(
            Request::put(uri),
            token,
            Some("application/json"),
            Body::from(body.to_string()),
        )
        .await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        token: Option<&str>,
        form: MultipartForm,
    ) -> TestResponse {
        let (content_type, bytes) = form.finish();
        self.send(
            Request::post(uri),
            token,
            Some(&content_type),
            Body::from(bytes),
        )
        .await
    }

    pub async fn put_multipart(
        &self,
        uri: &str,
        token: Option<&str>,
        form: MultipartForm,
    ) -> TestResponse {
        let (content_type, bytes) = form.finish();
        self.send(
            Request::put(uri),
            token,
            Some(&content_type),
            Body::from(bytes),
        )
        .await
    }

    async fn send(
        &self,
        mut builder: axum::http::request::Builder,
        token: Option<&str>,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Hand-rolled multipart/form-data body builder.
pub struct MultipartForm {
    boundary: String,
    buf: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: "cms-test-boundary-7f9c2e".to_string(),
            buf: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.buf
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.buf
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.buf,
        )
    }
}
