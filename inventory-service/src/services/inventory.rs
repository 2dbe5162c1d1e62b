//! Item catalog and the stock ledger.

use metrics::counter;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use service_core::error::AppError;

use crate::models::{CreateItem, Item, Receipt, UpdateItem};
use crate::services::numbering::BatchSequence;
use crate::services::parse_object_id;
use crate::services::store::Store;

use bson::oid::ObjectId;

/// Item CRUD plus the stock ledger: every quantity change flows through
/// [`InventoryService::adjust_stock`] or the invoice-driven
/// [`InventoryService::deduct_for_sale`], both of which floor quantity at
/// zero.
#[derive(Clone)]
pub struct InventoryService {
    store: Store,
    batch_sequence: BatchSequence,
}

impl InventoryService {
    /// The batch sequence picks up where the existing catalog left off.
    pub fn new(store: Store) -> Result<Self, AppError> {
        let issued = store.items().count()?;
        Ok(Self {
            store,
            batch_sequence: BatchSequence::starting_at(issued),
        })
    }

    /// Case-insensitive substring filter over name, SKU, and category.
    /// An empty or absent search term returns the whole catalog.
    #[instrument(skip(self))]
    pub fn list_items(&self, search: Option<&str>) -> Result<Vec<Item>, AppError> {
        let items = self.store.items().find_all()?;
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        Ok(match needle {
            None => items,
            Some(needle) => items
                .into_iter()
                .filter(|item| {
                    item.name.to_lowercase().contains(&needle)
                        || item.sku.to_lowercase().contains(&needle)
                        || item.category.to_lowercase().contains(&needle)
                })
                .collect(),
        })
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_item(&self, input: CreateItem) -> Result<Item, AppError> {
        let item = Item {
            id: ObjectId::new(),
            name: input.name,
            category: input.category,
            item_type: input.item_type,
            quantity: input.quantity.max(0),
            min_stock_level: input.min_stock_level.max(0),
            price: input.price.max(Decimal::ZERO),
            sku: input.sku,
            description: input.description,
            location: input.location,
            supplier: input.supplier,
            expiration_date: input.expiration_date,
            batch_number: self.batch_sequence.next(),
        };

        self.store.items().insert_one(&item)?;
        counter!("items_created_total").increment(1);
        info!(item_id = %item.id, batch_number = %item.batch_number, "Item created");

        Ok(item)
    }

    pub fn get_item(&self, id: &str) -> Result<Item, AppError> {
        let oid = parse_object_id(id, "item")?;
        self.store
            .items()
            .find_one(&oid)?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))
    }

    #[instrument(skip(self, update))]
    pub fn update_item(&self, id: &str, update: UpdateItem) -> Result<Item, AppError> {
        let oid = parse_object_id(id, "item")?;
        if update.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!("Nothing to update")));
        }

        let updated = self.store.items().update_one(&oid, |item| {
            if let Some(name) = update.name {
                item.name = name;
            }
            if let Some(category) = update.category {
                item.category = category;
            }
            if let Some(item_type) = update.item_type {
                item.item_type = item_type;
            }
            if let Some(quantity) = update.quantity {
                item.quantity = quantity.max(0);
            }
            if let Some(min_stock_level) = update.min_stock_level {
                item.min_stock_level = min_stock_level.max(0);
            }
            if let Some(price) = update.price {
                item.price = price.max(Decimal::ZERO);
            }
            if let Some(sku) = update.sku {
                item.sku = sku;
            }
            if let Some(description) = update.description {
                item.description = description;
            }
            if let Some(location) = update.location {
                item.location = location;
            }
            if let Some(supplier) = update.supplier {
                item.supplier = supplier;
            }
            if let Some(expiration_date) = update.expiration_date {
                item.expiration_date = expiration_date;
            }
        })?;

        updated.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))
    }

    #[instrument(skip(self))]
    pub fn delete_item(&self, id: &str) -> Result<(), AppError> {
        let oid = parse_object_id(id, "item")?;
        if self.store.items().delete_one(&oid)? {
            info!(item_id = %oid, "Item deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(anyhow::anyhow!("Item not found")))
        }
    }

    /// Single choke point for manual corrections and receiving.
    ///
    /// Applies `delta` to the item's quantity, flooring at zero. A positive
    /// delta appends a receipt carrying the before/after quantities; a
    /// decrease is not separately audited. The read-modify-write runs under
    /// the store's write lock, so concurrent adjusters cannot lose updates.
    #[instrument(skip(self, actor))]
    pub fn adjust_stock(
        &self,
        id: &str,
        delta: i64,
        actor: Option<String>,
    ) -> Result<(Item, Option<Receipt>), AppError> {
        let oid = parse_object_id(id, "item")?;

        let mut previous = 0i64;
        let updated = self.store.items().update_one(&oid, |item| {
            previous = item.quantity;
            item.quantity = (item.quantity + delta).max(0);
        })?;
        let item = updated.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Item not found")))?;

        let receipt = if delta > 0 {
            let receipt = Receipt::record(&item, delta, previous, actor);
            self.store.receipts().insert_one(&receipt)?;
            counter!("receipts_recorded_total").increment(1);
            info!(
                item_id = %item.id,
                quantity = delta,
                new_quantity = item.quantity,
                "Stock received"
            );
            Some(receipt)
        } else {
            info!(
                item_id = %item.id,
                delta,
                new_quantity = item.quantity,
                "Stock adjusted"
            );
            None
        };

        Ok((item, receipt))
    }

    /// Receiving workflow: a strictly positive quantity, and the caller gets
    /// both the updated item and the receipt back.
    pub fn receive_stock(
        &self,
        id: &str,
        quantity: i64,
        actor: Option<String>,
    ) -> Result<(Item, Receipt), AppError> {
        if quantity <= 0 {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "quantity must be > 0"
            )));
        }

        let (item, receipt) = self.adjust_stock(id, quantity, actor)?;
        match receipt {
            Some(receipt) => Ok((item, receipt)),
            None => Err(AppError::InternalError(anyhow::anyhow!(
                "positive adjustment produced no receipt"
            ))),
        }
    }

    /// Invoice-driven decrement: floors at zero and emits no receipt. A
    /// reference that does not resolve is skipped; a sale is never blocked
    /// by a stale or mistyped item reference on one of its lines.
    pub fn deduct_for_sale(&self, item_id: &ObjectId, quantity: i64) -> Result<(), AppError> {
        let updated = self.store.items().update_one(item_id, |item| {
            item.quantity = (item.quantity - quantity).max(0);
        })?;

        if updated.is_none() {
            debug!(item_id = %item_id, "Invoice line references a missing item; deduction skipped");
        }

        Ok(())
    }

    /// Receipts newest first; receipts with identical timestamps keep their
    /// creation order.
    pub fn list_receipts(&self) -> Result<Vec<Receipt>, AppError> {
        let mut receipts = self.store.receipts().find_all()?;
        receipts.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        Ok(receipts)
    }
}
