//! In-memory item store.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog_core::{DomainError, DomainResult, Entity, ItemId};

use crate::clock::{Clock, SystemClock};
use crate::item::{Item, ItemDraft};

#[derive(Debug)]
struct Catalog {
    items: Vec<Item>,
    next_id: Option<ItemId>,
}

impl Catalog {
    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| *item.id() == id)
    }
}

/// Sole owner of the item collection and the id counter.
///
/// Mutations (`create`, `update`, `delete`) run under the write lock, so id
/// assignment, append, overwrite and removal never interleave. Reads copy data
/// out under the read lock.
#[derive(Debug)]
pub struct ItemStore {
    inner: RwLock<Catalog>,
    clock: Arc<dyn Clock>,
}

impl ItemStore {
    /// Empty store using the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Catalog {
                items: Vec::new(),
                next_id: Some(ItemId::FIRST),
            }),
            clock,
        }
    }

    /// Assign the next id, stamp both timestamps and append.
    pub fn create(&self, draft: ItemDraft) -> DomainResult<Item> {
        let mut catalog = self.write();
        let id = catalog
            .next_id
            .ok_or_else(|| DomainError::unexpected("item id space exhausted"))?;
        catalog.next_id = id.next();

        let item = Item::new(id, draft, self.clock.now());
        catalog.items.push(item.clone());

        tracing::debug!(item_id = %id, "item created");
        Ok(item)
    }

    pub fn get(&self, id: ItemId) -> Option<Item> {
        let catalog = self.read();
        catalog.position(id).map(|idx| catalog.items[idx].clone())
    }

    pub fn get_or_not_found(&self, id: ItemId) -> DomainResult<Item> {
        self.get(id).ok_or_else(|| not_found(id))
    }

    /// Snapshot of every item in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.read().items.clone()
    }

    /// Overwrite all mutable fields of an existing item.
    pub fn update(&self, id: ItemId, draft: ItemDraft) -> DomainResult<Item> {
        let mut catalog = self.write();
        let now = self.clock.now();
        let idx = catalog.position(id).ok_or_else(|| not_found(id))?;

        let item = &mut catalog.items[idx];
        item.overwrite(draft, now);

        tracing::debug!(item_id = %id, "item updated");
        Ok(item.clone())
    }

    /// Returns whether an item was removed.
    pub fn delete(&self, id: ItemId) -> bool {
        let mut catalog = self.write();
        match catalog.position(id) {
            Some(idx) => {
                catalog.items.remove(idx);
                tracing::debug!(item_id = %id, "item deleted");
                true
            }
            None => false,
        }
    }

    /// Items whose category equals `category` ignoring case and surrounding
    /// whitespace. Blank input matches nothing.
    pub fn list_by_category(&self, category: &str) -> Vec<Item> {
        let needle = category.trim();
        if needle.is_empty() {
            return Vec::new();
        }

        self.read()
            .items
            .iter()
            .filter(|item| item.in_category(needle))
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.read().items.len()
    }

    // Every mutation leaves the catalog consistent before it can panic, so a
    // poisoned lock is safe to keep using.
    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: ItemId) -> DomainError {
    DomainError::not_found(format!("Item with ID {id} not found in the catalog"))
}
