pub(crate) mod models;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::models::InventoryItem;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum StoreError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("item {0} not found")]
    NotFound(u64),
}

/// Process-local inventory table shared by every request handler.
///
/// Records and the ID counter sit behind one lock, so two concurrent registrations can
/// never observe the same next ID.
#[derive(Debug, Clone, Default)]
pub(crate) struct InventoryDb {
    inner: Arc<RwLock<Table>>,
}

#[derive(Debug)]
pub(crate) struct Table {
    pub(crate) items: Vec<InventoryItem>,
    pub(crate) next_id: u64,
}

impl Default for Table {
    fn default() -> Self {
        Self { items: Vec::new(), next_id: 1 }
    }
}

impl Table {
    pub(crate) fn position(&self, id: u64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl InventoryDb {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.inner.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.inner.write().await
    }
}
