//! Domain services for inventory-service.

pub mod inventory;
pub mod invoicing;
pub mod metrics;
pub mod numbering;
pub mod seed;
pub mod stats;
pub mod store;

pub use inventory::InventoryService;
pub use invoicing::InvoicingService;
pub use metrics::{get_metrics, init_metrics};
pub use numbering::BatchSequence;
pub use stats::{compute_stats, InventoryStats};
pub use store::{Collection, Store};

use bson::oid::ObjectId;
use service_core::error::AppError;

/// Parse an id supplied by a caller. A string that is not a well-formed
/// ObjectId is the caller's mistake, not a lookup miss.
pub(crate) fn parse_object_id(raw: &str, kind: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid {} id", kind)))
}
