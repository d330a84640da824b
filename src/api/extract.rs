use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde::de::DeserializeOwned;

use crate::api::errors::ApiError;
use crate::schemas::inventory::InventoryCreate;

const PHOTO_FIELD: &str = "photo";

/// Body that may arrive as JSON or as an url-encoded HTML form.
///
/// An empty body deserializes like `{}` so that a bare `PUT` changes nothing.
pub(crate) struct JsonOrForm<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if has_content_type(&req, "application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_slice(b"{}")
        } else {
            serde_json::from_slice(&bytes)
        };
        value.map(Self).map_err(|err| ApiError::BadRequest(format!("Invalid request body: {err}")))
    }
}

fn has_content_type(req: &Request, expected: &str) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with(expected))
}

#[derive(Debug)]
pub(crate) struct PhotoUpload {
    pub(crate) content_type: Option<String>,
    pub(crate) bytes: Bytes,
}

/// Text fields plus the optional `photo` part of a multipart request.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    fields: Vec<(String, String)>,
    pub(crate) photo: Option<PhotoUpload>,
}

/// Multipart bodies go through [`UploadForm::read`]; JSON and url-encoded bodies
/// supply the same text fields without a photo.
#[async_trait]
impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if has_content_type(&req, "multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            return Self::read(multipart).await;
        }

        let JsonOrForm(fields) = JsonOrForm::<InventoryCreate>::from_request(req, state).await?;
        Ok(Self::from(fields))
    }
}

impl From<InventoryCreate> for UploadForm {
    fn from(fields: InventoryCreate) -> Self {
        let fields = [
            ("inventory_name", fields.inventory_name),
            ("name", fields.name),
            ("description", fields.description),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
        .collect();
        Self { fields, photo: None }
    }
}

impl UploadForm {
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| ApiError::BadRequest(format!("Invalid multipart data: {err}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == PHOTO_FIELD && field.file_name().is_some() {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::BadRequest(format!("Failed to read file: {err}")))?;

                // Browsers submit an empty, unnamed part when no file was chosen.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                if form.photo.is_some() {
                    return Err(ApiError::BadRequest(
                        "Only one photo may be uploaded per request".to_string(),
                    ));
                }
                form.photo = Some(PhotoUpload { content_type, bytes });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|err| ApiError::BadRequest(format!("Invalid field {name}: {err}")))?;
                form.fields.push((name, value));
            }
        }

        Ok(form)
    }

    /// First value submitted under any of `names`, in the order given.
    pub(crate) fn text(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|wanted| {
            self.fields.iter().find(|(name, _)| name == wanted).map(|(_, value)| value.as_str())
        })
    }
}
