//! Item request/response shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use service_core::error::AppError;

use crate::dtos::{coerce_decimal, coerce_int, coerce_opt_decimal, coerce_opt_int, double_option};
use crate::models::{CreateItem, Item, UpdateItem};

#[derive(Debug, Deserialize)]
pub struct ItemSearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub quantity: Option<Value>,
    pub min_stock_level: Option<Value>,
    pub price: Option<Value>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub supplier: Option<String>,
    pub expiration_date: Option<NaiveDate>,
}

impl CreateItemRequest {
    pub fn into_model(self) -> Result<CreateItem, AppError> {
        let name = self.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Missing or empty 'name'"
            )));
        }

        Ok(CreateItem {
            name,
            category: self.category.unwrap_or_default(),
            item_type: self.item_type.unwrap_or_default(),
            quantity: coerce_int("quantity", self.quantity.as_ref())?,
            min_stock_level: coerce_int("minStockLevel", self.min_stock_level.as_ref())?,
            price: coerce_decimal("price", self.price.as_ref())?,
            sku: self.sku.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            supplier: self.supplier.unwrap_or_default(),
            expiration_date: self.expiration_date,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub quantity: Option<Value>,
    pub min_stock_level: Option<Value>,
    pub price: Option<Value>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub expiration_date: Option<Option<NaiveDate>>,
}

impl UpdateItemRequest {
    pub fn into_model(self) -> Result<UpdateItem, AppError> {
        Ok(UpdateItem {
            name: self.name,
            category: self.category,
            item_type: self.item_type,
            quantity: coerce_opt_int("quantity", self.quantity.as_ref())?,
            min_stock_level: coerce_opt_int("minStockLevel", self.min_stock_level.as_ref())?,
            price: coerce_opt_decimal("price", self.price.as_ref())?,
            sku: self.sku,
            description: self.description,
            location: self.location,
            supplier: self.supplier,
            expiration_date: self.expiration_date,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: i64,
    pub min_stock_level: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub sku: String,
    pub description: String,
    pub location: String,
    pub supplier: String,
    pub expiration_date: Option<NaiveDate>,
    pub batch_number: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_hex(),
            name: item.name,
            category: item.category,
            item_type: item.item_type,
            quantity: item.quantity,
            min_stock_level: item.min_stock_level,
            price: item.price,
            sku: item.sku,
            description: item.description,
            location: item.location,
            supplier: item.supplier,
            expiration_date: item.expiration_date,
            batch_number: item.batch_number,
        }
    }
}
