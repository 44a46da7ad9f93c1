#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use clap::Parser;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use ojt_monitoring::app::create_app;
use ojt_monitoring::bootstrap::initialize_admin_user;
use ojt_monitoring::config::Config;
use ojt_monitoring::session::InMemorySessionStore;
use ojt_monitoring::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@ojt.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const WEEKLY_SLUG: &str = "weekly-report";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub admin_cookie: String,
    storage: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let storage = TempDir::new().unwrap();
        let storage_root = storage.path().to_str().unwrap().to_string();

        let config = Config::parse_from([
            "ojt-test",
            "--database-url",
            "sqlite::memory:",
            "--storage-root",
            storage_root.as_str(),
            "--password-hash-cost",
            "4",
            "--admin-email",
            ADMIN_EMAIL,
            "--admin-password",
            ADMIN_PASSWORD,
            "--weekly-report-slug",
            WEEKLY_SLUG,
            "--swagger-enabled",
            "false",
        ]);

        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        assert!(initialize_admin_user(&db, &config).await.unwrap());

        let sessions = std::sync::Arc::new(InMemorySessionStore::new(config.session_ttl_seconds));
        let state = AppState::new(db.clone(), config, sessions);
        let router = create_app(state);

        let mut app = TestApp {
            router,
            db,
            admin_cookie: String::new(),
            storage,
        };
        app.admin_cookie = app
            .login(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("admin login failed");
        app
    }

    pub fn storage_root(&self) -> &Path {
        self.storage.path()
    }

    pub fn stored_file(&self, relative: &str) -> PathBuf {
        self.storage.path().join(relative)
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or_default().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            set_cookie,
            body,
        }
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let cookie = self.admin_cookie.clone();
        self.call(method, uri, Some(&cookie), body).await
    }

    /// Returns the `name=value` cookie pair on success.
    pub async fn login(&self, email: &str, password: &str) -> Option<String> {
        let res = self
            .call(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        if res.body["success"] == json!(true) {
            res.set_cookie
        } else {
            None
        }
    }

    pub async fn create_student(&self, name: &str, email: &str, student_no: &str) -> i32 {
        let res = self
            .admin(
                Method::POST,
                "/api/v1/admin/manage_students",
                Some(json!({
                    "name": name,
                    "email": email,
                    "student_no": student_no,
                    "course": "BSIT",
                    "year_level": "4",
                    "section": "A",
                })),
            )
            .await;
        assert_eq!(res.body["success"], json!(true), "{}", res.body);
        res.body["student_id"].as_i64().unwrap() as i32
    }

    pub async fn create_company(&self, name: &str) -> i32 {
        let res = self
            .admin(
                Method::POST,
                "/api/v1/admin/manage_companies",
                Some(json!({ "name": name, "address": "Cebu City" })),
            )
            .await;
        assert_eq!(res.body["success"], json!(true), "{}", res.body);
        let list = self
            .admin(Method::GET, "/api/v1/admin/manage_companies", None)
            .await;
        find_id(&list.body["data"], "name", name, "id")
    }

    pub async fn create_requirement(&self, name: &str, required: bool, slug: Option<&str>) -> i32 {
        let res = self
            .admin(
                Method::POST,
                "/api/v1/admin/requirements_crud",
                Some(json!({ "name": name, "is_required": required, "slug": slug })),
            )
            .await;
        assert_eq!(res.body["success"], json!(true), "{}", res.body);
        let list = self
            .admin(Method::GET, "/api/v1/admin/requirements_crud", None)
            .await;
        find_id(&list.body["data"], "name", name, "id")
    }

    pub async fn student_requirements(&self, student_id: i32) -> Value {
        let res = self
            .admin(
                Method::GET,
                &format!("/api/v1/admin/manage_requirements?student_id={}", student_id),
                None,
            )
            .await;
        assert_eq!(res.body["success"], json!(true), "{}", res.body);
        res.body
    }

    pub async fn set_status(
        &self,
        student_id: i32,
        requirement_id: i32,
        submission_id: Option<i64>,
        status: &str,
    ) -> TestResponse {
        self.admin(
            Method::PUT,
            "/api/v1/admin/manage_requirements",
            Some(json!({
                "student_id": student_id,
                "requirement_id": requirement_id,
                "submission_id": submission_id,
                "status": status,
            })),
        )
        .await
    }

    pub async fn upload(
        &self,
        cookie: &str,
        student_id: i32,
        requirement_id: i32,
        file_name: &str,
        contents: &[u8],
    ) -> TestResponse {
        let boundary = "----ojt-test-boundary";
        let mut body = Vec::new();
        for (name, value) in [
            ("student_id", student_id.to_string()),
            ("requirement_id", requirement_id.to_string()),
        ] {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/student/upload_requirement")
            .header(header::COOKIE, cookie)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }
}

/// Finds `want` in the first object of `rows` whose `key` equals `value`.
pub fn find_id(rows: &Value, key: &str, value: &str, want: &str) -> i32 {
    rows.as_array()
        .unwrap()
        .iter()
        .find(|row| row[key] == json!(value))
        .and_then(|row| row[want].as_i64())
        .unwrap_or_else(|| panic!("no row with {key} = {value} in {rows}")) as i32
}

pub fn row_for(data: &Value, requirement_id: i32) -> &Value {
    data.as_array()
        .unwrap()
        .iter()
        .find(|row| row["requirement_id"] == json!(requirement_id))
        .unwrap()
}
