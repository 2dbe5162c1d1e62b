//! inventory-service: stock ledger, receipt log, and invoicing backend.
//!
//! The service tracks stock items, records every stock increase as an
//! immutable receipt, and produces invoices whose totals are recomputed on
//! every read. Quantity never goes negative: each mutation path floors at
//! zero, and the single choke point for quantity changes lives in
//! [`services::InventoryService`].

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
