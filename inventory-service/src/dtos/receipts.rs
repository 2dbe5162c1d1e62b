//! Stock adjustment and receipt shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use service_core::error::AppError;

use crate::dtos::items::ItemResponse;
use crate::dtos::coerce_int;
use crate::models::Receipt;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockRequest {
    pub delta: Option<Value>,
    pub changed_by: Option<String>,
}

impl AdjustStockRequest {
    pub fn delta(&self) -> Result<i64, AppError> {
        coerce_int("delta", self.delta.as_ref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveStockRequest {
    pub item_id: Option<String>,
    pub quantity: Option<Value>,
    pub received_by: Option<String>,
}

impl ReceiveStockRequest {
    pub fn item_id(&self) -> Result<&str, AppError> {
        self.item_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("itemId is required")))
    }

    pub fn quantity(&self) -> Result<i64, AppError> {
        coerce_int("quantity", self.quantity.as_ref())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub id: String,
    pub item_id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub received_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub received_by: Option<String>,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            id: receipt.id.to_hex(),
            item_id: receipt.item_id.to_hex(),
            sku: receipt.sku,
            name: receipt.name,
            quantity: receipt.quantity,
            previous_quantity: receipt.previous_quantity,
            new_quantity: receipt.new_quantity,
            received_at: receipt.received_at,
            created_at: receipt.created_at,
            received_by: receipt.received_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdjustStockResponse {
    pub item: ItemResponse,
    pub receipt: Option<ReceiptResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveStockResponse {
    pub updated_item: ItemResponse,
    pub receipt: ReceiptResponse,
}
