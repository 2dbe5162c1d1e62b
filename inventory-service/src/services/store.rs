//! In-process document store.
//!
//! The backing store is a set of typed collections keyed by `ObjectId`,
//! offering insert/find/update/delete by id. Mutations run under the
//! collection's write lock, so a read-modify-write expressed as an
//! `update_one` closure is atomic against concurrent writers of the same
//! collection. Listing returns documents in creation order; callers apply
//! their own filtering and sorting on top.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bson::oid::ObjectId;
use thiserror::Error;

use service_core::error::AppError;

use crate::models::{Invoice, Item, Receipt};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StoreError(anyhow::Error::new(err))
    }
}

/// A stored document carries its own identifier.
pub trait Document {
    fn id(&self) -> ObjectId;
}

impl Document for Item {
    fn id(&self) -> ObjectId {
        self.id
    }
}

impl Document for Receipt {
    fn id(&self) -> ObjectId {
        self.id
    }
}

impl Document for Invoice {
    fn id(&self) -> ObjectId {
        self.id
    }
}

struct Slot<T> {
    seq: u64,
    doc: T,
}

struct CollectionInner<T> {
    docs: HashMap<ObjectId, Slot<T>>,
    next_seq: u64,
}

/// Typed collection handle. Cloning shares the underlying map.
pub struct Collection<T> {
    inner: Arc<RwLock<CollectionInner<T>>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Document + Clone> Collection<T> {
    fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CollectionInner {
                docs: HashMap::new(),
                next_seq: 0,
            })),
        }
    }

    pub fn insert_one(&self, doc: &T) -> Result<ObjectId, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = doc.id();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.docs.insert(id, Slot {
            seq,
            doc: doc.clone(),
        });
        Ok(id)
    }

    pub fn find_one(&self, id: &ObjectId) -> Result<Option<T>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.docs.get(id).map(|slot| slot.doc.clone()))
    }

    /// All documents in creation order.
    pub fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut slots: Vec<&Slot<T>> = inner.docs.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        Ok(slots.into_iter().map(|slot| slot.doc.clone()).collect())
    }

    /// Apply `mutate` to the document under the write lock and return the
    /// updated copy, or `None` when the id does not resolve.
    pub fn update_one<F>(&self, id: &ObjectId, mutate: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        match inner.docs.get_mut(id) {
            Some(slot) => {
                mutate(&mut slot.doc);
                Ok(Some(slot.doc.clone()))
            }
            None => Ok(None),
        }
    }

    pub fn delete_one(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.docs.remove(id).is_some())
    }

    pub fn count(&self) -> Result<u64, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.docs.len() as u64)
    }
}

/// The three collections backing the service. Cheap to clone; every clone
/// shares the same data.
#[derive(Clone)]
pub struct Store {
    items: Collection<Item>,
    receipts: Collection<Receipt>,
    invoices: Collection<Invoice>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            items: Collection::new(),
            receipts: Collection::new(),
            invoices: Collection::new(),
        }
    }

    pub fn items(&self) -> &Collection<Item> {
        &self.items
    }

    pub fn receipts(&self) -> &Collection<Receipt> {
        &self.receipts
    }

    pub fn invoices(&self) -> &Collection<Invoice> {
        &self.invoices
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(name: &str) -> Item {
        Item {
            id: ObjectId::new(),
            name: name.to_string(),
            category: String::new(),
            item_type: String::new(),
            quantity: 0,
            min_stock_level: 0,
            price: Decimal::ZERO,
            sku: String::new(),
            description: String::new(),
            location: String::new(),
            supplier: String::new(),
            expiration_date: None,
            batch_number: String::new(),
        }
    }

    #[test]
    fn insert_then_find_returns_the_document() {
        let store = Store::new();
        let doc = item("widget");
        let id = store.items().insert_one(&doc).unwrap();

        let found = store.items().find_one(&id).unwrap();
        assert_eq!(found, Some(doc));
    }

    #[test]
    fn find_all_preserves_creation_order() {
        let store = Store::new();
        let first = item("first");
        let second = item("second");
        store.items().insert_one(&first).unwrap();
        store.items().insert_one(&second).unwrap();

        let names: Vec<String> = store
            .items()
            .find_all()
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn update_one_returns_updated_copy() {
        let store = Store::new();
        let doc = item("widget");
        let id = store.items().insert_one(&doc).unwrap();

        let updated = store
            .items()
            .update_one(&id, |i| i.quantity = 7)
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 7);
        assert_eq!(store.items().find_one(&id).unwrap().unwrap().quantity, 7);
    }

    #[test]
    fn update_one_missing_id_is_none() {
        let store = Store::new();
        let missing = store
            .items()
            .update_one(&ObjectId::new(), |i| i.quantity = 7)
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn delete_one_reports_whether_anything_was_removed() {
        let store = Store::new();
        let doc = item("widget");
        let id = store.items().insert_one(&doc).unwrap();

        assert!(store.items().delete_one(&id).unwrap());
        assert!(!store.items().delete_one(&id).unwrap());
        assert_eq!(store.items().count().unwrap(), 0);
    }
}
