pub mod health;
pub mod invoices;
pub mod items;
pub mod receipts;
pub mod stats;

pub use health::{health_check, metrics_endpoint};
pub use invoices::{create_invoice, get_invoice, list_invoices, update_invoice};
pub use items::{adjust_stock, create_item, delete_item, get_item, list_items, update_item};
pub use receipts::{list_receipts, receive_stock};
pub use stats::get_stats;
