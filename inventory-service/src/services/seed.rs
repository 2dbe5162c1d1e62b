//! Demo catalog seeding for development environments.

use chrono::NaiveDate;
use tracing::info;

use service_core::error::AppError;

use crate::models::CreateItem;
use crate::services::inventory::InventoryService;

/// Insert the demo catalog when the store is empty, assigning batch numbers
/// through the regular creation path. Returns how many items were inserted.
pub fn seed_demo_items(inventory: &InventoryService) -> Result<usize, AppError> {
    if !inventory.list_items(None)?.is_empty() {
        return Ok(0);
    }

    let demo = demo_items();
    let count = demo.len();
    for input in demo {
        inventory.create_item(input)?;
    }

    info!(count, "Seeded demo items");
    Ok(count)
}

fn demo_item(
    name: &str,
    category: &str,
    item_type: &str,
    quantity: i64,
    min_stock_level: i64,
    price: &str,
    sku: &str,
    description: &str,
    location: &str,
    supplier: &str,
    expiration_date: Option<NaiveDate>,
) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        category: category.to_string(),
        item_type: item_type.to_string(),
        quantity,
        min_stock_level,
        price: price.parse().unwrap_or_default(),
        sku: sku.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        supplier: supplier.to_string(),
        expiration_date,
    }
}

fn demo_items() -> Vec<CreateItem> {
    vec![
        demo_item(
            "Wireless Mouse",
            "Electronics",
            "Finished Good",
            150,
            50,
            "29.99",
            "ELEC-MOUSE-001",
            "Ergonomic wireless mouse with USB receiver",
            "Warehouse A - Aisle 3",
            "TechSupply Co.",
            None,
        ),
        demo_item(
            "Office Desk Chair",
            "Furniture",
            "Finished Good",
            25,
            15,
            "249.99",
            "FURN-CHAIR-002",
            "Adjustable office chair with lumbar support",
            "Warehouse B - Section 2",
            "FurniturePro Inc.",
            None,
        ),
        demo_item(
            "Printer Paper (Ream)",
            "Office Supplies",
            "Consumable",
            200,
            100,
            "5.49",
            "OFFICE-PAPER-003",
            "500-sheet pack of standard A4 printer paper",
            "Warehouse A - Aisle 1",
            "OfficeWorld Distributors",
            None,
        ),
        demo_item(
            "USB-C Cable",
            "Electronics",
            "Component",
            80,
            40,
            "9.99",
            "ELEC-CABLE-004",
            "1.5m USB-C to USB-C charging cable",
            "Warehouse A - Aisle 4",
            "TechSupply Co.",
            None,
        ),
        demo_item(
            "Bottled Water (Case)",
            "Beverages",
            "Consumable",
            60,
            30,
            "12.99",
            "BEV-WATER-005",
            "24-pack of bottled drinking water",
            "Warehouse C - Cold Storage",
            "FreshDrinks Ltd.",
            NaiveDate::from_ymd_opt(2025, 6, 30),
        ),
    ]
}
