use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::{InventoryItem, SearchHit};

#[derive(Debug, Serialize)]
pub(crate) struct InventoryResponse {
    #[serde(rename = "ID")]
    pub(crate) id: u64,
    #[serde(rename = "InventoryName")]
    pub(crate) name: String,
    #[serde(rename = "Description")]
    pub(crate) description: String,
    #[serde(rename = "PhotoFilename")]
    pub(crate) photo_filename: Option<String>,
    #[serde(rename = "PhotoUrl")]
    pub(crate) photo_url: Option<String>,
}

impl InventoryResponse {
    pub(crate) fn from_db(item: InventoryItem) -> Self {
        Self {
            photo_filename: item.photo_filename().map(str::to_string),
            photo_url: item.photo_url(),
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}

/// Registration fields when they arrive as JSON or an url-encoded form instead of multipart.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryCreate {
    #[serde(default)]
    pub(crate) inventory_name: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct InventoryUpdate {
    #[serde(default, alias = "name")]
    #[validate(length(min = 1, message = "inventory_name must not be empty"))]
    pub(crate) inventory_name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

/// JSON clients send numbers, HTML forms send strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseFlag {
    Bool(bool),
    Text(String),
}

impl LooseFlag {
    /// An HTML checkbox submits `on` when ticked.
    pub(crate) fn is_set(&self) -> bool {
        match self {
            LooseFlag::Bool(value) => *value,
            LooseFlag::Text(value) => matches!(value.trim(), "on" | "true"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    pub(crate) id: Option<LooseId>,
    #[serde(default, rename = "includePhoto", alias = "include_photo")]
    pub(crate) include_photo: Option<LooseFlag>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "ID")]
    pub(crate) id: u64,
    #[serde(rename = "InventoryName")]
    pub(crate) name: String,
    #[serde(rename = "Description")]
    pub(crate) description: String,
    #[serde(rename = "PhotoUrl", skip_serializing_if = "Option::is_none")]
    pub(crate) photo_url: Option<String>,
}

impl From<SearchHit> for SearchResponse {
    fn from(hit: SearchHit) -> Self {
        Self { id: hit.id, name: hit.name, description: hit.description, photo_url: hit.photo_url }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::models::StoredPhoto;

    #[test]
    fn response_uses_wire_names_and_null_photo() {
        let item = InventoryItem {
            id: 5,
            name: "Kettle".to_string(),
            description: String::new(),
            photo: None,
        };
        let value = serde_json::to_value(InventoryResponse::from_db(item)).expect("json");
        assert_eq!(
            value,
            json!({
                "ID": 5,
                "InventoryName": "Kettle",
                "Description": "",
                "PhotoFilename": null,
                "PhotoUrl": null
            })
        );
    }

    #[test]
    fn response_derives_photo_url_from_filename() {
        let item = InventoryItem {
            id: 9,
            name: "Lamp".to_string(),
            description: "desk lamp".to_string(),
            photo: Some(StoredPhoto {
                filename: "abc123".to_string(),
                content_type: None,
                size: 1,
                sha256: String::new(),
            }),
        };
        let value = serde_json::to_value(InventoryResponse::from_db(item)).expect("json");
        assert_eq!(value["PhotoFilename"], "abc123");
        assert_eq!(value["PhotoUrl"], "/inventory/9/photo");
    }

    #[test]
    fn search_request_accepts_json_and_form_shapes() {
        let from_json: SearchRequest =
            serde_json::from_value(json!({"id": 3, "includePhoto": true})).expect("json");
        assert!(matches!(from_json.id, Some(LooseId::Number(3))));
        assert!(from_json.include_photo.expect("flag").is_set());

        let from_form: SearchRequest =
            serde_json::from_value(json!({"id": "3", "includePhoto": "on"})).expect("form");
        assert!(matches!(from_form.id, Some(LooseId::Text(ref id)) if id == "3"));
        assert!(from_form.include_photo.expect("flag").is_set());

        assert!(!LooseFlag::Text("off".to_string()).is_set());
    }

    #[test]
    fn search_response_omits_missing_photo_url() {
        let value = serde_json::to_value(SearchResponse {
            id: 1,
            name: "Saw".to_string(),
            description: String::new(),
            photo_url: None,
        })
        .expect("json");
        assert!(value.get("PhotoUrl").is_none());
    }

    #[test]
    fn update_accepts_name_alias_and_validates_empty() {
        let update: InventoryUpdate =
            serde_json::from_value(json!({"name": "Box"})).expect("alias");
        assert_eq!(update.inventory_name.as_deref(), Some("Box"));
        assert!(update.validate().is_ok());

        let empty: InventoryUpdate =
            serde_json::from_value(json!({"inventory_name": ""})).expect("empty");
        assert!(empty.validate().is_err());
    }
}
