//! Request and response shapes for the HTTP surface.
//!
//! Responses use camelCase field names and plain-number money, mirroring
//! what the frontend consumes. Requests accept a JSON number or a numeric
//! string wherever the API promises numeric coercion; the helpers below
//! implement that contract.

mod invoices;
mod items;
mod receipts;
mod stats;

pub use invoices::{
    CreateInvoiceRequest, InvoiceLineInput, InvoiceLineResponse, InvoiceResponse,
    InvoiceTotalsResponse, UpdateInvoiceRequest,
};
pub use items::{CreateItemRequest, ItemResponse, ItemSearchParams, UpdateItemRequest};
pub use receipts::{
    AdjustStockRequest, AdjustStockResponse, ReceiptResponse, ReceiveStockRequest,
    ReceiveStockResponse,
};
pub use stats::StatsResponse;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use service_core::error::AppError;

fn bad_numeric(field: &str) -> AppError {
    AppError::BadRequest(anyhow::anyhow!("Bad numeric value for '{}'", field))
}

/// Coerce to an integer: numbers truncate, numeric strings parse, absent and
/// null default to zero. Anything else is the caller's error.
pub(crate) fn coerce_int(field: &str, value: Option<&Value>) -> Result<i64, AppError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| bad_numeric(field)),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| bad_numeric(field)),
        Some(_) => Err(bad_numeric(field)),
    }
}

/// Coerce to a decimal; same acceptance rules as [`coerce_int`]. Numbers go
/// through their shortest string form so `29.99` stays exactly `29.99`.
pub(crate) fn coerce_decimal(field: &str, value: Option<&Value>) -> Result<Decimal, AppError> {
    match value {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::Number(n)) => n
            .to_string()
            .parse::<Decimal>()
            .map_err(|_| bad_numeric(field)),
        Some(Value::String(s)) => s.trim().parse::<Decimal>().map_err(|_| bad_numeric(field)),
        Some(_) => Err(bad_numeric(field)),
    }
}

/// Partial-update variant: absent and null mean "leave unchanged".
pub(crate) fn coerce_opt_int(field: &str, value: Option<&Value>) -> Result<Option<i64>, AppError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        some => coerce_int(field, some).map(Some),
    }
}

/// Partial-update variant of [`coerce_decimal`].
pub(crate) fn coerce_opt_decimal(
    field: &str,
    value: Option<&Value>,
) -> Result<Option<Decimal>, AppError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        some => coerce_decimal(field, some).map(Some),
    }
}

/// Lenient variants for invoice lines: absent or malformed defaults to zero
/// rather than failing the whole invoice.
pub(crate) fn coerce_int_lenient(value: Option<&Value>) -> i64 {
    coerce_int("", value).unwrap_or(0)
}

pub(crate) fn coerce_decimal_lenient(value: Option<&Value>) -> Decimal {
    coerce_decimal("", value).unwrap_or(Decimal::ZERO)
}

/// `Option<Option<T>>` field helper: absent stays `None`, an explicit null
/// arrives as `Some(None)`. Use with `#[serde(default, deserialize_with =
/// "double_option")]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
