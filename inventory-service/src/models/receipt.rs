//! Stock receipt model.

use chrono::{DateTime, Utc};

use bson::oid::ObjectId;

use crate::models::Item;

/// Immutable audit record of a stock increase.
///
/// Carries a point-in-time snapshot of the item's name and SKU plus the
/// quantity before and after the increase, so the record stays meaningful
/// after the item is edited or deleted. The item reference is non-owning.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub id: ObjectId,
    pub item_id: ObjectId,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub received_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub received_by: Option<String>,
}

impl Receipt {
    /// Build the audit record for an increase that has already been applied:
    /// `item` holds the post-update state, `previous_quantity` the quantity
    /// read immediately before it.
    pub fn record(
        item: &Item,
        quantity: i64,
        previous_quantity: i64,
        received_by: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            item_id: item.id,
            sku: item.sku.clone(),
            name: item.name.clone(),
            quantity,
            previous_quantity,
            new_quantity: item.quantity,
            received_at: now,
            created_at: now,
            received_by,
        }
    }
}
