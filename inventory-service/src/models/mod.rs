//! Domain models for inventory-service.

mod invoice;
mod item;
mod receipt;

pub use invoice::{CreateInvoice, Invoice, InvoiceLine, InvoiceTotals, UpdateInvoice};
pub use item::{CreateItem, Item, UpdateItem};
pub use receipt::Receipt;
