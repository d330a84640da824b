use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::extract::{JsonOrForm, PhotoUpload, UploadForm};
use crate::api::handlers::fallback;
use crate::api::validation::{parse_item_id, parse_search_id};
use crate::core::metrics as app_metrics;
use crate::core::state::AppState;
use crate::db::models::StoredPhoto;
use crate::repositories::{self, inventory::validate_name};
use crate::schemas::inventory::{
    InventoryResponse, InventoryUpdate, SearchRequest, SearchResponse,
};
use crate::schemas::MessageResponse;

const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register).fallback(fallback))
        .route("/inventory", get(list_inventory).fallback(fallback))
        .route(
            "/inventory/:id",
            get(get_item).put(update_item).delete(delete_item).fallback(fallback),
        )
        .route("/inventory/:id/photo", get(get_photo).put(replace_photo).fallback(fallback))
        .route("/search", post(search).fallback(fallback))
}

async fn register(
    State(state): State<AppState>,
    form: UploadForm,
) -> Result<(StatusCode, Json<InventoryResponse>), ApiError> {
    let name = form.text(&["inventory_name", "name"]).unwrap_or_default();
    validate_name(name)?;

    let photo = match form.photo.as_ref() {
        Some(upload) => Some(store_photo(&state, upload).await?),
        None => None,
    };
    let filename = photo.as_ref().map(|photo| photo.filename.clone());

    let created = repositories::inventory::create(
        state.db(),
        repositories::inventory::CreateItem {
            name,
            description: form.text(&["description"]),
            photo,
        },
    )
    .await;

    let item = match created {
        Ok(item) => item,
        Err(err) => {
            if let Some(filename) = filename {
                state.storage().remove(&filename).await;
            }
            return Err(err.into());
        }
    };

    metrics::counter!(app_metrics::ITEMS_REGISTERED).increment(1);
    tracing::info!(id = item.id, has_photo = item.photo.is_some(), "Registered inventory item");

    Ok((StatusCode::CREATED, Json(InventoryResponse::from_db(item))))
}

async fn list_inventory(State(state): State<AppState>) -> Json<Vec<InventoryResponse>> {
    let items = repositories::inventory::list(state.db()).await;
    Json(items.into_iter().map(InventoryResponse::from_db).collect())
}

async fn get_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    let item = repositories::inventory::fetch_one_by_id(state.db(), id).await?;
    Ok(Json(InventoryResponse::from_db(item)))
}

async fn update_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<InventoryUpdate>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    if repositories::inventory::find_by_id(state.db(), id).await.is_none() {
        return Err(ApiError::item_not_found());
    }
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let item = repositories::inventory::update(
        state.db(),
        id,
        repositories::inventory::UpdateItem {
            name: payload.inventory_name,
            description: payload.description,
        },
    )
    .await?;

    tracing::info!(id, "Updated inventory item");
    Ok(Json(InventoryResponse::from_db(item)))
}

async fn get_photo(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let id = parse_item_id(&id)?;
    let photo = repositories::inventory::find_by_id(state.db(), id)
        .await
        .and_then(|item| item.photo)
        .ok_or_else(|| ApiError::NotFound("Photo or item with this ID was not found".to_string()))?;

    if !state.storage().exists(&photo.filename).await {
        tracing::warn!(id, filename = %photo.filename, "Photo blob missing from cache directory");
        return Err(ApiError::NotFound("Photo file is missing from the cache".to_string()));
    }

    let bytes = state
        .storage()
        .read(&photo.filename)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to read photo"))?;

    let content_type = photo_content_type(&photo, state.settings().storage().report_photo_mime);
    Ok(([(header::CONTENT_TYPE, content_type)], Body::from(bytes)).into_response())
}

async fn replace_photo(
    Path(id): Path<String>,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<InventoryResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    repositories::inventory::fetch_one_by_id(state.db(), id).await?;

    // Without a readable multipart body there is simply no file.
    let form = match multipart {
        Ok(multipart) => UploadForm::read(multipart).await?,
        Err(rejection) => {
            tracing::debug!(
                id,
                reason = %rejection.body_text(),
                "Photo replacement without multipart body"
            );
            UploadForm::default()
        }
    };

    let upload = form
        .photo
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("Photo file was not provided".to_string()))?;
    let photo = store_photo(&state, upload).await?;
    let filename = photo.filename.clone();

    let (item, previous) = match repositories::inventory::replace_photo(state.db(), id, photo).await
    {
        Ok(replaced) => replaced,
        Err(err) => {
            state.storage().remove(&filename).await;
            return Err(err.into());
        }
    };
    if let Some(previous) = previous {
        state.storage().remove(&previous.filename).await;
    }

    tracing::info!(id, filename = %filename, "Replaced inventory photo");
    Ok(Json(InventoryResponse::from_db(item)))
}

async fn delete_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_item_id(&id)?;
    let removed = repositories::inventory::delete(state.db(), id).await?;
    if let Some(photo) = removed.photo {
        state.storage().remove(&photo.filename).await;
    }

    metrics::counter!(app_metrics::ITEMS_DELETED).increment(1);
    tracing::info!(id, "Deleted inventory item");

    Ok(Json(MessageResponse { message: format!("Item with ID {id} was deleted successfully") }))
}

async fn search(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let id = parse_search_id(payload.id.as_ref())?;
    let include_photo = payload.include_photo.as_ref().is_some_and(|flag| flag.is_set());

    let hit = repositories::inventory::search(state.db(), id, include_photo)
        .await
        .map_err(|_| ApiError::NotFound(format!("Item with ID {id} was not found")))?;

    Ok(Json(hit.into()))
}

async fn store_photo(state: &AppState, upload: &PhotoUpload) -> Result<StoredPhoto, ApiError> {
    let photo = state
        .storage()
        .upload_bytes(upload.content_type.clone(), &upload.bytes)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to store photo"))?;

    app_metrics::record_photo_stored(photo.size);
    tracing::debug!(filename = %photo.filename, size = photo.size, sha256 = %photo.sha256, "Stored photo");
    Ok(photo)
}

/// Photos are served as JPEG unless the service is told to echo the uploaded type.
fn photo_content_type(photo: &StoredPhoto, report_actual: bool) -> HeaderValue {
    let fallback = HeaderValue::from_static(DEFAULT_PHOTO_CONTENT_TYPE);
    if !report_actual {
        return fallback;
    }

    photo
        .content_type
        .as_deref()
        .filter(|mime| mime.starts_with("image/"))
        .and_then(|mime| HeaderValue::from_str(mime).ok())
        .unwrap_or(fallback)
}
