use crate::db::models::{InventoryItem, SearchHit, StoredPhoto};
use crate::db::{InventoryDb, StoreError};

pub(crate) struct CreateItem<'a> {
    pub(crate) name: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) photo: Option<StoredPhoto>,
}

#[derive(Debug, Default)]
pub(crate) struct UpdateItem {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
}

pub(crate) fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("inventory_name is required"));
    }
    Ok(())
}

pub(crate) async fn create(
    db: &InventoryDb,
    params: CreateItem<'_>,
) -> Result<InventoryItem, StoreError> {
    validate_name(params.name)?;

    let mut table = db.write().await;
    let item = InventoryItem {
        id: table.allocate_id(),
        name: params.name.to_string(),
        description: params.description.unwrap_or_default().to_string(),
        photo: params.photo,
    };
    table.items.push(item.clone());
    Ok(item)
}

pub(crate) async fn list(db: &InventoryDb) -> Vec<InventoryItem> {
    db.read().await.items.clone()
}

pub(crate) async fn count(db: &InventoryDb) -> usize {
    db.read().await.items.len()
}

pub(crate) async fn find_by_id(db: &InventoryDb, id: u64) -> Option<InventoryItem> {
    db.read().await.items.iter().find(|item| item.id == id).cloned()
}

pub(crate) async fn fetch_one_by_id(
    db: &InventoryDb,
    id: u64,
) -> Result<InventoryItem, StoreError> {
    find_by_id(db, id).await.ok_or(StoreError::NotFound(id))
}

pub(crate) async fn update(
    db: &InventoryDb,
    id: u64,
    params: UpdateItem,
) -> Result<InventoryItem, StoreError> {
    let mut table = db.write().await;
    let index = table.position(id).ok_or(StoreError::NotFound(id))?;
    if let Some(name) = params.name.as_deref() {
        validate_name(name)?;
    }

    let item = &mut table.items[index];
    if let Some(name) = params.name {
        item.name = name;
    }
    if let Some(description) = params.description {
        item.description = description;
    }
    Ok(item.clone())
}

/// Swaps the item's photo, handing back the one it replaced.
pub(crate) async fn replace_photo(
    db: &InventoryDb,
    id: u64,
    photo: StoredPhoto,
) -> Result<(InventoryItem, Option<StoredPhoto>), StoreError> {
    let mut table = db.write().await;
    let index = table.position(id).ok_or(StoreError::NotFound(id))?;
    let item = &mut table.items[index];
    let previous = item.photo.replace(photo);
    Ok((item.clone(), previous))
}

pub(crate) async fn delete(db: &InventoryDb, id: u64) -> Result<InventoryItem, StoreError> {
    let mut table = db.write().await;
    let index = table.position(id).ok_or(StoreError::NotFound(id))?;
    Ok(table.items.remove(index))
}

pub(crate) async fn search(
    db: &InventoryDb,
    id: u64,
    include_photo: bool,
) -> Result<SearchHit, StoreError> {
    let item = fetch_one_by_id(db, id).await?;
    let photo_url = if include_photo { item.photo_url() } else { None };
    Ok(SearchHit { id: item.id, name: item.name, description: item.description, photo_url })
}
