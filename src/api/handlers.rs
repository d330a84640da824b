use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use std::collections::HashMap;

use crate::api::errors::ApiError;
use crate::core::metrics;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::{HealthResponse, RootResponse};

const REGISTER_FORM: &str = include_str!("../../static/RegisterForm.html");
const SEARCH_FORM: &str = include_str!("../../static/SearchForm.html");

pub(crate) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Inventory Rust API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut status = "healthy".to_string();
    let mut components = HashMap::new();

    let items = repositories::inventory::count(state.db()).await;
    components.insert("store".to_string(), format!("healthy ({items} items)"));

    if state.storage().is_available().await {
        components.insert("cache_dir".to_string(), "healthy".to_string());
    } else {
        components.insert(
            "cache_dir".to_string(),
            format!("unavailable: {}", state.storage().root().display()),
        );
        status = "degraded".to_string();
    }

    Json(HealthResponse { service: "inventory-api".to_string(), status, components })
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

pub(crate) async fn register_form() -> Html<&'static str> {
    Html(REGISTER_FORM)
}

pub(crate) async fn search_form() -> Html<&'static str> {
    Html(SEARCH_FORM)
}

/// Unknown paths are 404 for the verbs the API speaks and 405 for every other verb.
pub(crate) async fn fallback(method: Method) -> ApiError {
    match method {
        Method::GET | Method::HEAD | Method::POST | Method::PUT | Method::DELETE => {
            ApiError::NotFound("Resource not found".to_string())
        }
        other => ApiError::MethodNotAllowed(other),
    }
}
