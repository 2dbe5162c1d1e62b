//! Stock item model.

use bson::oid::ObjectId;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A stock-keeping unit: current quantity, reorder threshold, and the
/// catalog fields describing where it lives and who supplies it.
///
/// `quantity` is never negative; every mutation path clamps at zero.
/// `batch_number` is assigned at creation and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ObjectId,
    pub name: String,
    pub category: String,
    pub item_type: String,
    pub quantity: i64,
    pub min_stock_level: i64,
    pub price: Decimal,
    pub sku: String,
    pub description: String,
    pub location: String,
    pub supplier: String,
    pub expiration_date: Option<NaiveDate>,
    pub batch_number: String,
}

/// Input for creating an item. `name` is already validated non-empty and the
/// numeric fields coerced by the request layer; the service assigns the id
/// and batch number.
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    pub category: String,
    pub item_type: String,
    pub quantity: i64,
    pub min_stock_level: i64,
    pub price: Decimal,
    pub sku: String,
    pub description: String,
    pub location: String,
    pub supplier: String,
    pub expiration_date: Option<NaiveDate>,
}

/// Partial update: only `Some` fields are applied. The nested option on
/// `expiration_date` distinguishes "leave unchanged" from "clear".
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub category: Option<String>,
    pub item_type: Option<String>,
    pub quantity: Option<i64>,
    pub min_stock_level: Option<i64>,
    pub price: Option<Decimal>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub supplier: Option<String>,
    pub expiration_date: Option<Option<NaiveDate>>,
}

impl UpdateItem {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.item_type.is_none()
            && self.quantity.is_none()
            && self.min_stock_level.is_none()
            && self.price.is_none()
            && self.sku.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.supplier.is_none()
            && self.expiration_date.is_none()
    }
}
