//! Dashboard stats response shape.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::services::InventoryStats;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_quantity: i64,
    pub low_stock_count: i64,
    pub low_stock_items: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inventory_value: Decimal,
    pub unique_categories_count: i64,
}

impl From<InventoryStats> for StatsResponse {
    fn from(stats: InventoryStats) -> Self {
        Self {
            total_quantity: stats.total_quantity,
            low_stock_count: stats.low_stock_count,
            low_stock_items: stats.low_stock_items,
            total_inventory_value: stats.total_inventory_value,
            unique_categories_count: stats.unique_categories_count,
        }
    }
}
