#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InventoryItem {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) photo: Option<StoredPhoto>,
}

/// Blob written to the cache directory for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredPhoto {
    pub(crate) filename: String,
    pub(crate) content_type: Option<String>,
    pub(crate) size: u64,
    pub(crate) sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchHit {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) photo_url: Option<String>,
}

pub(crate) fn photo_url(id: u64) -> String {
    format!("/inventory/{id}/photo")
}

impl InventoryItem {
    pub(crate) fn photo_filename(&self) -> Option<&str> {
        self.photo.as_ref().map(|photo| photo.filename.as_str())
    }

    pub(crate) fn photo_url(&self) -> Option<String> {
        self.photo.as_ref().map(|_| photo_url(self.id))
    }
}
