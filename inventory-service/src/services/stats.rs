//! Dashboard statistics: a read-side fold over the item catalog.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::models::Item;

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryStats {
    pub total_quantity: i64,
    pub low_stock_count: i64,
    pub low_stock_items: Vec<String>,
    pub total_inventory_value: Decimal,
    pub unique_categories_count: i64,
}

/// Fold the catalog into the dashboard summary. An item counts as low-stock
/// only when its threshold is positive and quantity sits below it; category
/// counting ignores empty values. The inventory value is rounded to two
/// decimal places.
pub fn compute_stats(items: &[Item]) -> InventoryStats {
    let mut total_quantity = 0i64;
    let mut total_value = Decimal::ZERO;
    let mut low_stock_items = Vec::new();
    let mut categories = HashSet::new();

    for item in items {
        total_quantity += item.quantity;
        total_value += item.price * Decimal::from(item.quantity);

        if !item.category.is_empty() {
            categories.insert(item.category.as_str());
        }

        if item.min_stock_level > 0 && item.quantity < item.min_stock_level {
            low_stock_items.push(item.name.clone());
        }
    }

    InventoryStats {
        total_quantity,
        low_stock_count: low_stock_items.len() as i64,
        low_stock_items,
        total_inventory_value: total_value.round_dp(2),
        unique_categories_count: categories.len() as i64,
    }
}
