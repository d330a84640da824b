use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use clap::Parser;
use tempfile::TempDir;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::api;
use crate::core::config::{Cli, Settings};
use crate::core::state::AppState;
use crate::db::InventoryDb;
use crate::services::storage::StorageService;

const MULTIPART_BOUNDARY: &str = "inventory-test-boundary";

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: Router,
    _cache_dir: TempDir,
    _guard: OwnedMutexGuard<()>,
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("INVENTORY_LOG_LEVEL", "debug");
    std::env::remove_var("INVENTORY_LOG_JSON");
    std::env::remove_var("INVENTORY_REPORT_PHOTO_MIME");
    std::env::remove_var("MAX_UPLOAD_SIZE_MB");
    std::env::remove_var("BACKEND_CORS_ORIGINS");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
}

pub(crate) async fn setup_test_context() -> TestContext {
    setup_test_context_with_env(&[]).await
}

/// Builds an app over a fresh temporary cache directory with extra env overrides applied.
pub(crate) async fn setup_test_context_with_env(overrides: &[(&str, &str)]) -> TestContext {
    let guard = env_lock().await;
    set_test_env();
    for (key, value) in overrides {
        std::env::set_var(key, value);
    }

    let cache_dir = tempfile::tempdir().expect("cache dir");
    let cache = cache_dir.path().join("photos");
    let cli = Cli::try_parse_from([
        "inventory-rust",
        "--host",
        "127.0.0.1",
        "--port",
        "8000",
        "--cache",
        cache.to_str().expect("utf-8 cache path"),
    ])
    .expect("cli");
    let settings = Settings::load(&cli).expect("settings");
    set_test_env();

    let storage = StorageService::from_settings(&settings).await.expect("storage");
    let state = AppState::new(settings, InventoryDb::new(), storage);
    let app = api::router::router(state.clone());

    TestContext { state, app, _cache_dir: cache_dir, _guard: guard }
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) fn form_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request body")
}

pub(crate) struct FilePart<'a> {
    pub(crate) field: &'a str,
    pub(crate) filename: &'a str,
    pub(crate) content_type: &'a str,
    pub(crate) bytes: &'a [u8],
}

pub(crate) fn multipart_request(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.filename, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"))
        .body(Body::from(body))
        .expect("request body")
}

pub(crate) async fn read_bytes(response: axum::response::Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.expect("response body").to_vec()
}

pub(crate) async fn read_text(response: axum::response::Response<Body>) -> String {
    String::from_utf8(read_bytes(response).await).expect("utf-8 body")
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = read_bytes(response).await;
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
